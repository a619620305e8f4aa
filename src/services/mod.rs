// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod completion;
pub mod document;
pub mod identity;
pub mod plan;

pub use completion::{ChatCompletion, ChatRequest, CompletionClient, CompletionProvider};
pub use document::{paginate, PageLayout, PlanDocument};
pub use identity::{IdentityProvider, SignedInUser, SupabaseAuthClient};
pub use plan::PlanService;
