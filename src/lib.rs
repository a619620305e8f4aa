// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! RepUp: AI-generated workout plans.
//!
//! This crate provides the backend API that turns a fitness profile into a
//! workout plan via a hosted language model, stores the plan per user and
//! serves it back for viewing and export.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RecordStore;
use services::{CompletionProvider, IdentityProvider};
use std::sync::Arc;

/// Shared application state.
///
/// Clients are built once at startup and shared by every request.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
    pub completions: Arc<dyn CompletionProvider>,
    pub identity: Arc<dyn IdentityProvider>,
}
