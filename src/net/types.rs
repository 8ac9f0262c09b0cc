//! User DTO as returned by the auth endpoints.
//!
//! DESIGN
//! ======
//! Field names match the server's JSON exactly so the value can be stored
//! and re-read from `localStorage` without a mapping layer.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authenticated user profile.
///
/// The session store treats this as an opaque payload; it is never validated
/// or interpreted on the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Login handle.
    pub username: String,
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Authorization role (e.g. `"user"`, `"admin"`).
    pub role: String,
    /// Avatar image URL, if the user uploaded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Reputation score computed server-side from exchanges and reviews.
    pub success_score: i64,
    pub books_shared: i64,
    pub books_received: i64,
}
