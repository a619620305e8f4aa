// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client (Supabase Auth password sign-in).

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

/// Identity confirmed by the provider after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub id: String,
    pub email: String,
}

/// External credential store.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange email and password for the user's identity.
    ///
    /// Rejected credentials yield [`AppError::InvalidCredentials`].
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInUser, AppError>;
}

/// Supabase Auth (GoTrue) client.
#[derive(Clone)]
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// GoTrue error bodies come in two shapes depending on version.
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

impl AuthErrorBody {
    fn message(&self) -> String {
        self.error_description
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "Authentication failed".to_string())
    }

    fn is_invalid_credentials(&self) -> bool {
        self.error.as_deref() == Some("invalid_grant")
            || self.error_code.as_deref() == Some("invalid_credentials")
            || self.message().contains("Invalid login credentials")
    }
}

impl SupabaseAuthClient {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            anon_key: anon_key.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInUser, AppError> {
        let url = format!("{}/auth/v1/token", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("grant_type", "password")])
            .header("apikey", self.anon_key.as_str())
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Identity provider request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            if body.is_invalid_credentials() {
                return Err(AppError::InvalidCredentials);
            }
            tracing::warn!(status = %status, message = %body.message(), "Sign-in rejected");
            return Err(AppError::Identity(body.message()));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Invalid identity provider response: {}", e))
        })?;

        Ok(SignedInUser {
            id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
        })
    }
}
