// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plan generation and persistence.
//!
//! One request makes at most two sequential external calls:
//! 1. Completion provider (the prompt as a single user message)
//! 2. Record store insert (only if step 1 produced text)
//!
//! Nothing is retried or compensated. If the insert fails the generated text
//! is dropped and the store error is returned.

use crate::db::RecordStore;
use crate::error::Result;
use crate::models::WorkoutRecord;
use crate::services::completion::{ChatRequest, CompletionProvider};
use crate::AppState;

/// Plan generation pipeline over the shared clients.
pub struct PlanService<'a> {
    completions: &'a dyn CompletionProvider,
    store: &'a dyn RecordStore,
    model: &'a str,
}

impl<'a> PlanService<'a> {
    pub fn new(
        completions: &'a dyn CompletionProvider,
        store: &'a dyn RecordStore,
        model: &'a str,
    ) -> Self {
        Self {
            completions,
            store,
            model,
        }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(
            state.completions.as_ref(),
            state.store.as_ref(),
            &state.config.completion_model,
        )
    }

    /// Generate a plan for `prompt` without storing it.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::single_prompt(self.model, prompt);
        let completion = self.completions.complete(&request).await?;
        let content = completion.into_first_content()?;

        tracing::info!(
            model = self.model,
            content_len = content.len(),
            "Workout plan generated"
        );

        Ok(content)
    }

    /// Generate a plan and store it for `uid`.
    ///
    /// A missing `uid` is stored as null. Every call inserts a new record.
    pub async fn generate_and_store(
        &self,
        prompt: &str,
        uid: Option<String>,
    ) -> Result<WorkoutRecord> {
        let content = self.generate(prompt).await?;

        let record = WorkoutRecord::new(uid, content);
        let stored = self.store.insert_workout(&record).await.map_err(|e| {
            tracing::error!(
                uid = ?record.uid,
                error = %e,
                "Failed to store generated workout plan"
            );
            e
        })?;

        tracing::info!(
            uid = ?stored.uid,
            workout_id = ?stored.id,
            "Workout plan stored"
        );

        Ok(stored)
    }
}
