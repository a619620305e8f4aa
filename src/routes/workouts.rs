// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plan routes: generation and viewing.

use crate::error::{AppError, Result};
use crate::middleware::session::session_uid;
use crate::middleware::SessionUser;
use crate::models::{Profile, WorkoutRecord};
use crate::services::document::{paginate, PageLayout, PlanDocument};
use crate::services::PlanService;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection, StringRejection},
        Query, State,
    },
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Fixed prompt for the sample plan.
pub const SAMPLE_PROMPT: &str =
    "give me a 1 week push pull legs workout plan in structured format.";

/// Generation routes. The session cookie is optional here.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/getworkout", post(generate_workout))
        .route("/api/aiworkoutgen", post(sample_workout))
        .route("/api/profile/workout", post(generate_from_profile))
}

/// Viewer routes (session cookie required).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn viewer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts))
        .route("/api/workouts/latest", get(latest_workout))
        .route("/api/workouts/latest/document", get(latest_workout_document))
}

// ─── Generation ──────────────────────────────────────────────

/// Generated plan text.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanResponse {
    pub content: String,
}

/// Generate a plan from a raw prompt body and store it for the cookie user.
async fn generate_workout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    body: std::result::Result<String, StringRejection>,
) -> Result<Json<PlanResponse>> {
    let prompt = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let uid = session_uid(&jar);
    tracing::info!(
        uid = ?uid,
        prompt_len = prompt.len(),
        "Workout plan requested"
    );

    let stored = PlanService::from_state(&state)
        .generate_and_store(&prompt, uid)
        .await?;

    Ok(Json(PlanResponse {
        content: stored.workout_data,
    }))
}

/// Generate a plan from a structured profile.
async fn generate_from_profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<Profile>, JsonRejection>,
) -> Result<Json<PlanResponse>> {
    let Json(profile) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    profile
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let uid = session_uid(&jar);
    tracing::info!(
        uid = ?uid,
        goal = %profile.goal,
        level = %profile.fitness_level,
        "Workout plan requested from profile"
    );

    let stored = PlanService::from_state(&state)
        .generate_and_store(&profile.to_prompt(), uid)
        .await?;

    Ok(Json(PlanResponse {
        content: stored.workout_data,
    }))
}

/// Sample plan from a fixed prompt. Not stored.
async fn sample_workout(State(state): State<Arc<AppState>>) -> Result<Json<PlanResponse>> {
    let content = PlanService::from_state(&state)
        .generate(SAMPLE_PROMPT)
        .await?;
    Ok(Json(PlanResponse { content }))
}

// ─── Viewing ─────────────────────────────────────────────────

/// Stored plan.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StoredPlanResponse {
    pub id: Option<String>,
    pub content: String,
    pub created_at: String,
}

impl From<WorkoutRecord> for StoredPlanResponse {
    fn from(record: WorkoutRecord) -> Self {
        Self {
            id: record.id,
            content: record.workout_data,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanHistoryResponse {
    pub workouts: Vec<StoredPlanResponse>,
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    20
}

const MAX_LIMIT: u32 = 100;

async fn fetch_latest(state: &AppState, user: &SessionUser) -> Result<WorkoutRecord> {
    state
        .store
        .latest_workout(&user.uid)
        .await?
        .ok_or_else(|| AppError::NotFound("No workout plan found".to_string()))
}

/// Newest stored plan for the session user.
async fn latest_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<StoredPlanResponse>> {
    let record = fetch_latest(&state, &user).await?;
    Ok(Json(record.into()))
}

/// All stored plans for the session user, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<PlanHistoryResponse>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = query.limit.clamp(1, MAX_LIMIT);

    let workouts = state
        .store
        .list_workouts(&user.uid, limit)
        .await?
        .into_iter()
        .map(StoredPlanResponse::from)
        .collect();

    Ok(Json(PlanHistoryResponse { workouts }))
}

/// Paginated export of the newest plan.
async fn latest_workout_document(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<SessionUser>,
) -> Result<Json<PlanDocument>> {
    let record = fetch_latest(&state, &user).await?;
    Ok(Json(paginate(&record.workout_data, PageLayout::default())))
}
