//! Todo repository implementation.
//!
//! Every query is scoped to the owning user.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::todo::{self, ActiveModel, Entity as TodoEntity};
use crate::domain::{CreateTodo, Todo, UpdateTodo};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Todo repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List the todos owned by `user_id`, oldest first
    async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<Todo>>;

    /// Insert a todo owned by `user_id`
    async fn create(&self, user_id: i32, todo: CreateTodo) -> AppResult<Todo>;

    /// Apply changes to a todo owned by `user_id`.
    /// Missing or foreign todos yield `NotFound`.
    async fn update(&self, id: i32, user_id: i32, changes: UpdateTodo) -> AppResult<Todo>;
}

/// SeaORM-backed todo repository
pub struct TodoStore {
    db: DatabaseConnection,
}

impl TodoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn list_by_owner(&self, user_id: i32) -> AppResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .filter(todo::Column::UserId.eq(user_id))
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Todo::from).collect())
    }

    async fn create(&self, user_id: i32, todo: CreateTodo) -> AppResult<Todo> {
        let active_model = ActiveModel {
            name: Set(todo.name),
            description: Set(todo.description),
            is_completed: Set(todo.is_completed),
            user_id: Set(user_id),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Todo::from(model))
    }

    async fn update(&self, id: i32, user_id: i32, changes: UpdateTodo) -> AppResult<Todo> {
        let model = TodoEntity::find_by_id(id)
            .filter(todo::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut updated = Todo::from(model.clone());
        updated.apply(changes);

        let mut active: ActiveModel = model.into();
        active.name = Set(updated.name);
        active.description = Set(updated.description);
        active.is_completed = Set(updated.is_completed);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Todo::from(model))
    }
}
