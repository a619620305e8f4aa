// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Generated workout plan record.

use serde::{Deserialize, Serialize};

/// One generated plan, stored in the `workouts` collection.
///
/// A user accumulates one record per generation request; records are never
/// updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Store-assigned document ID (absent until inserted)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    /// Owning user ID, taken from the `uid` cookie (None when absent)
    pub uid: Option<String>,
    /// Raw plan text exactly as returned by the model
    pub workout_data: String,
    /// Insert time (RFC3339, microsecond precision)
    pub created_at: String,
}

impl WorkoutRecord {
    /// New, not yet stored record stamped with the current time.
    pub fn new(uid: Option<String>, workout_data: String) -> Self {
        Self {
            id: None,
            uid,
            workout_data,
            created_at: crate::time_utils::now_rfc3339(),
        }
    }
}
