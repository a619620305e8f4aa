//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User record stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identity provider user ID (also used as document ID)
    pub id: String,
    /// Email address used to sign in
    pub email: String,
    /// When the user first signed in
    pub created_at: String,
}
