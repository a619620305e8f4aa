// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `uid` session cookie handling.
//!
//! The cookie holds the identity provider's user ID as plain text. It is not
//! signed and carries no expiry; its value is trusted as-is.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::Config;
use crate::error::AppError;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "uid";

/// User identified by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub uid: String,
}

/// Read the user ID from the session cookie, if present and non-empty.
pub fn session_uid(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Middleware that requires a session cookie.
///
/// Inserts [`SessionUser`] into request extensions.
pub async fn require_session(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let Some(uid) = session_uid(&jar) else {
        return AppError::Unauthorized.into_response();
    };

    request.extensions_mut().insert(SessionUser { uid });
    next.run(request).await
}

/// Build the session cookie set after sign-in.
///
/// Readable from browser scripts, which read the ID directly.
pub fn session_cookie(uid: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, uid))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(false)
        .secure(config.secure_cookies())
        .build()
}

/// Cookie that clears the session on sign-out. Attributes match creation.
pub fn removal_cookie(config: &Config) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap};

    fn jar_with(cookie_header: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, cookie_header.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_session_uid_present() {
        let jar = jar_with("theme=dark; uid=abc-123");
        assert_eq!(session_uid(&jar), Some("abc-123".to_string()));
    }

    #[test]
    fn test_session_uid_missing_or_empty() {
        assert_eq!(session_uid(&jar_with("theme=dark")), None);
        assert_eq!(session_uid(&jar_with("uid=")), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let config = Config::test_default();
        let cookie = session_cookie("abc".to_string(), &config).to_string();

        assert!(cookie.starts_with("uid=abc"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires() {
        let mut config = Config::test_default();
        config.frontend_url = "https://repup.app".to_string();

        let cookie = removal_cookie(&config).to_string();
        assert!(cookie.starts_with("uid="));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Secure"));
    }
}
