//! User domain entity and related types.

use serde::{Deserialize, Serialize};

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn new(id: i32, login: String, password_hash: String) -> Self {
        Self {
            id,
            login,
            password_hash,
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i32,
    pub login: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
        }
    }
}
