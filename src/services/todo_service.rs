//! Todo service - per-user todo use cases.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateTodo, Todo, UpdateTodo};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Todo service trait for dependency injection.
///
/// Every operation is scoped to `user_id`, the authenticated caller.
#[async_trait]
pub trait TodoService: Send + Sync {
    /// List the caller's todos
    async fn list_todos(&self, user_id: i32) -> AppResult<Vec<Todo>>;

    /// Create a todo owned by the caller
    async fn create_todo(&self, user_id: i32, todo: CreateTodo) -> AppResult<Todo>;

    /// Update one of the caller's todos
    async fn update_todo(&self, id: i32, user_id: i32, changes: UpdateTodo) -> AppResult<Todo>;

    /// Delete one of the caller's todos, returning the removed record
    async fn delete_todo(&self, id: i32, user_id: i32) -> AppResult<Todo>;
}

/// Concrete implementation of TodoService using Unit of Work.
pub struct TodoManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TodoManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TodoService for TodoManager<U> {
    async fn list_todos(&self, user_id: i32) -> AppResult<Vec<Todo>> {
        self.uow.todos().list_by_owner(user_id).await
    }

    async fn create_todo(&self, user_id: i32, todo: CreateTodo) -> AppResult<Todo> {
        let todo = self.uow.todos().create(user_id, todo).await?;
        tracing::debug!(todo_id = todo.id, user_id, "Todo created");
        Ok(todo)
    }

    async fn update_todo(&self, id: i32, user_id: i32, changes: UpdateTodo) -> AppResult<Todo> {
        self.uow.todos().update(id, user_id, changes).await
    }

    async fn delete_todo(&self, id: i32, user_id: i32) -> AppResult<Todo> {
        let todo = with_transaction!(self.uow, |ctx| ctx.todos().delete(id, user_id).await)?;
        tracing::debug!(todo_id = todo.id, user_id, "Todo deleted");
        Ok(todo)
    }
}
