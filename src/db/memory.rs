//! In-process record store.
//!
//! Selected with `RECORD_STORE=memory`. Contents are lost on restart.

use crate::db::RecordStore;
use crate::error::AppError;
use crate::models::{User, WorkoutRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    /// Insertion order
    workouts: Vec<WorkoutRecord>,
    next_id: u64,
}

/// Record store backed by process memory.
#[derive(Default)]
pub struct MemoryDb {
    tables: Mutex<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored plan in insertion order.
    pub fn workouts(&self) -> Vec<WorkoutRecord> {
        self.lock().workouts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock only means another request panicked mid-write;
        // the tables themselves are still usable.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryDb {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(user_id).cloned())
    }

    async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.lock().users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn insert_workout(&self, record: &WorkoutRecord) -> Result<WorkoutRecord, AppError> {
        let mut tables = self.lock();
        tables.next_id += 1;

        let mut stored = record.clone();
        stored.id = Some(format!("workout-{}", tables.next_id));
        tables.workouts.push(stored.clone());
        Ok(stored)
    }

    async fn list_workouts(&self, uid: &str, limit: u32) -> Result<Vec<WorkoutRecord>, AppError> {
        let tables = self.lock();
        // Newest first; later inserts win ties on created_at.
        let mut owned: Vec<(usize, &WorkoutRecord)> = tables
            .workouts
            .iter()
            .enumerate()
            .filter(|(_, w)| w.uid.as_deref() == Some(uid))
            .collect();
        owned.sort_by(|(ia, a), (ib, b)| b.created_at.cmp(&a.created_at).then(ib.cmp(ia)));

        Ok(owned
            .into_iter()
            .take(limit as usize)
            .map(|(_, w)| w.clone())
            .collect())
    }
}
