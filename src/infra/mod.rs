//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations, repositories and the Unit of Work
//! that hands them to services.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, MigrationState, Migrator};
pub use repositories::{TodoRepository, TodoStore, UserRepository, UserStore};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, TxTodoRepository, UnitOfWork};
