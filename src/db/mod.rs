//! Database layer.
//!
//! Handlers talk to a [`RecordStore`]; production uses Firestore, local
//! development and tests use the in-memory backend.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{User, WorkoutRecord};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const WORKOUTS: &str = "workouts";
}

/// Persistent storage for users and generated plans.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Get a user by identity provider ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Create or replace a user.
    async fn upsert_user(&self, user: &User) -> Result<(), AppError>;

    /// Insert a new plan record and return it with its assigned ID.
    ///
    /// Always inserts; identical records produce distinct rows.
    async fn insert_workout(&self, record: &WorkoutRecord) -> Result<WorkoutRecord, AppError>;

    /// Plans owned by `uid`, newest first.
    async fn list_workouts(&self, uid: &str, limit: u32) -> Result<Vec<WorkoutRecord>, AppError>;

    /// Newest plan owned by `uid`.
    async fn latest_workout(&self, uid: &str) -> Result<Option<WorkoutRecord>, AppError> {
        Ok(self.list_workouts(uid, 1).await?.into_iter().next())
    }
}
