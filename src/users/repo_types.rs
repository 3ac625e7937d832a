use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account record in the repository.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,            // unique user ID
    pub username: String,      // unique login name
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
