// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use repup::config::Config;
use repup::db::{FirestoreDb, MemoryDb, RecordStore};
use repup::error::AppError;
use repup::routes::create_router;
use repup::services::identity::{IdentityProvider, SignedInUser};
use repup::services::{ChatCompletion, ChatRequest, CompletionProvider};
use repup::AppState;
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// What the scripted provider answers with.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Scripted {
    Completion(ChatCompletion),
    Error(String),
}

/// Completion provider that records every request and replays a fixed answer.
#[allow(dead_code)]
pub struct ScriptedProvider {
    answer: Scripted,
    requests: Mutex<Vec<ChatRequest>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn answering(content: &str) -> Arc<Self> {
        Self::with(Scripted::Completion(ChatCompletion::from_content(content)))
    }

    pub fn with(answer: Scripted) -> Arc<Self> {
        Arc::new(Self {
            answer,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.answer {
            Scripted::Completion(c) => Ok(c.clone()),
            Scripted::Error(msg) => Err(AppError::CompletionApi(msg.clone())),
        }
    }
}

/// Identity provider accepting one email/password pair.
#[allow(dead_code)]
pub struct StaticIdentity {
    pub user_id: String,
    pub email: String,
    pub password: String,
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedInUser, AppError> {
        if email == self.email && password == self.password {
            Ok(SignedInUser {
                id: self.user_id.clone(),
                email: self.email.clone(),
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

#[allow(dead_code)]
pub const TEST_USER_ID: &str = "6f1c2a9e-0000-4000-8000-000000000001";
#[allow(dead_code)]
pub const TEST_EMAIL: &str = "lifter@example.com";
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "correct-horse";

/// Build shared state over the given provider and store.
#[allow(dead_code)]
pub fn test_state(
    config: Config,
    provider: Arc<dyn CompletionProvider>,
    store: Arc<dyn RecordStore>,
) -> Arc<AppState> {
    Arc::new(AppState {
        config,
        store,
        completions: provider,
        identity: Arc::new(StaticIdentity {
            user_id: TEST_USER_ID.to_string(),
            email: TEST_EMAIL.to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    })
}

/// Create a test app over an in-memory store.
/// Returns the router and the store for inspection.
#[allow(dead_code)]
pub fn create_test_app(provider: Arc<dyn CompletionProvider>) -> (axum::Router, Arc<MemoryDb>) {
    let store = Arc::new(MemoryDb::new());
    let state = test_state(Config::test_default(), provider, store.clone());
    (create_router(state), store)
}

/// Create a test app whose store is offline; every write fails.
#[allow(dead_code)]
pub fn create_test_app_offline_store(provider: Arc<dyn CompletionProvider>) -> axum::Router {
    let state = test_state(
        Config::test_default(),
        provider,
        Arc::new(FirestoreDb::new_mock()),
    );
    create_router(state)
}

/// Create a test app with a specific frontend URL (cookie attributes).
#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> (axum::Router, Arc<MemoryDb>) {
    let mut config = Config::test_default();
    config.frontend_url = frontend_url.to_string();
    let store = Arc::new(MemoryDb::new());
    let state = test_state(config, ScriptedProvider::answering("plan"), store.clone());
    (create_router(state), store)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
