// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RepUp API Server
//!
//! Generates workout plans with a hosted language model and stores them per
//! user.

use repup::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryDb, RecordStore},
    services::{CompletionClient, SupabaseAuthClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting RepUp API");

    let store: Arc<dyn RecordStore> = match config.record_store {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; plans are lost on restart");
            Arc::new(MemoryDb::new())
        }
    };

    let completions = Arc::new(CompletionClient::new(
        config.completion_api_url.clone(),
        config.completion_api_key.clone(),
    ));
    tracing::info!(
        api = %config.completion_api_url,
        model = %config.completion_model,
        "Completion client initialized"
    );

    let identity = Arc::new(SupabaseAuthClient::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        completions,
        identity,
    });

    // Build router
    let app = repup::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("repup=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
