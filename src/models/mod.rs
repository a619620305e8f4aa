// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod profile;
pub mod user;
pub mod workout;

pub use profile::{FitnessLevel, Gender, Goal, Profile, WorkoutSplit};
pub use user::User;
pub use workout::WorkoutRecord;
