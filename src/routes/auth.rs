// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in and sign-out routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::session::{removal_cookie, session_cookie};
use crate::models::User;
use crate::services::SignedInUser;
use crate::time_utils::now_rfc3339;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
}

/// Sign-in form.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub message: String,
    pub user: LoginUser,
}

/// Sign in with email and password and start a cookie session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let Json(form) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    form.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let signed_in = state.identity.sign_in(&form.email, &form.password).await?;

    tracing::info!(user_id = %signed_in.id, "User signed in");

    record_first_sign_in(&state, &signed_in).await;

    let jar = jar.add(session_cookie(signed_in.id.clone(), &state.config));

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: LoginUser {
                id: signed_in.id,
                email: signed_in.email,
            },
        }),
    ))
}

/// Create the user record on first sign-in.
///
/// Failures are logged; sign-in still succeeds.
async fn record_first_sign_in(state: &AppState, signed_in: &SignedInUser) {
    match state.store.get_user(&signed_in.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            let user = User {
                id: signed_in.id.clone(),
                email: signed_in.email.clone(),
                created_at: now_rfc3339(),
            };
            match state.store.upsert_user(&user).await {
                Ok(()) => tracing::info!(user_id = %user.id, "New user recorded"),
                Err(e) => tracing::warn!(error = %e, "Failed to record new user"),
            }
        }
        Err(e) => tracing::warn!(error = %e, "Failed to look up user"),
    }
}

/// Sign out by clearing the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.add(removal_cookie(&state.config)), StatusCode::NO_CONTENT)
}
