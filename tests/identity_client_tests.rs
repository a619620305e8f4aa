// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase Auth client tests against a local fake identity provider.

use axum::{
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use repup::error::AppError;
use repup::services::{IdentityProvider, SupabaseAuthClient};
use std::collections::HashMap;

const ANON_KEY: &str = "anon-key";

async fn token(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    if params.get("grant_type").map(String::as_str) != Some("password")
        || headers.get("apikey").and_then(|h| h.to_str().ok()) != Some(ANON_KEY)
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "No API key found in request" })),
        );
    }

    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("a@example.com"), Some("password123")) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "access_token": "jwt",
                "token_type": "bearer",
                "user": { "id": "user-uuid", "email": "a@example.com" }
            })),
        ),
        (Some("unconfirmed@example.com"), _) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "code": 400,
                "error_code": "email_not_confirmed",
                "msg": "Email not confirmed"
            })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        ),
    }
}

async fn spawn_identity() -> String {
    let app = Router::new().route("/auth/v1/token", post(token));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_sign_in_success() {
    let client = SupabaseAuthClient::new(spawn_identity().await, ANON_KEY);

    let user = client.sign_in("a@example.com", "password123").await.unwrap();
    assert_eq!(user.id, "user-uuid");
    assert_eq!(user.email, "a@example.com");
}

#[tokio::test]
async fn test_sign_in_invalid_credentials() {
    let client = SupabaseAuthClient::new(spawn_identity().await, ANON_KEY);

    let err = client
        .sign_in("a@example.com", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_sign_in_other_error_keeps_provider_message() {
    let client = SupabaseAuthClient::new(spawn_identity().await, ANON_KEY);

    let err = client
        .sign_in("unconfirmed@example.com", "password123")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Identity(ref msg) if msg == "Email not confirmed"));
}
