//! Unit of Work: the services' single handle on persistence.
//!
//! Plain reads and single writes go through the pooled repositories.
//! Multi-step writes run in [`UnitOfWork::transaction`], whose closure
//! receives a [`TransactionContext`] bound to one open transaction.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::repositories::entities::todo::{self, Entity as TodoEntity};
use super::repositories::{TodoRepository, TodoStore, UserRepository, UserStore};
use crate::domain::Todo;
use crate::errors::{AppError, AppResult, OptionExt};

/// Future produced by a transactional closure; may borrow the context.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Repository access plus transactions.
///
/// `transaction` is generic, so mockall cannot derive this trait; service
/// tests implement it by hand around the mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn todos(&self) -> Arc<dyn TodoRepository>;

    /// Commits when `f` returns `Ok`, rolls back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Handed to transactional closures.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    pub fn todos(&self) -> TxTodoRepository<'a> {
        TxTodoRepository { txn: self.txn }
    }
}

/// SeaORM-backed Unit of Work over one connection pool.
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    todos: Arc<TodoStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            todos: Arc::new(TodoStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn todos(&self) -> Arc<dyn TodoRepository> {
        self.todos.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.db.begin().await?;

        match f(TransactionContext { txn: &txn }).await {
            Ok(value) => {
                txn.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    tracing::error!("Rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }
}

/// Todo writes that must share a transaction.
pub struct TxTodoRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxTodoRepository<'_> {
    /// Remove the caller's todo and return it as it was before deletion.
    ///
    /// Missing ids and other users' todos both yield `NotFound`.
    pub async fn delete(&self, id: i32, user_id: i32) -> AppResult<Todo> {
        let removed: Todo = TodoEntity::find_by_id(id)
            .filter(todo::Column::UserId.eq(user_id))
            .one(self.txn)
            .await?
            .ok_or_not_found()?
            .into();

        let result = TodoEntity::delete_many()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await?;

        // Lost a race with another delete of the same row
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(removed)
    }
}

/// Run `$body` inside `$uow.transaction`, with `$ctx` bound to the
/// [`TransactionContext`].
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
