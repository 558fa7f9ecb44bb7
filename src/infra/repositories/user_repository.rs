//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by login (exact match)
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Create a new user. A taken login yields `Conflict`.
    async fn create(&self, login: String, password_hash: String) -> AppResult<User>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, login: String, password_hash: String) -> AppResult<User> {
        let active_model = ActiveModel {
            login: Set(login),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(unique_to_conflict)?;
        Ok(User::from(model))
    }
}

/// Map a unique-index violation on `users.login` to `Conflict`.
///
/// The service checks for an existing login first; this covers two
/// registrations racing for the same name.
fn unique_to_conflict(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Login is already taken"),
        _ => AppError::from(err),
    }
}
