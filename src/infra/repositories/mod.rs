//! Repository layer - Data access abstraction
//!
//! Repositories hide SeaORM behind traits so services can be tested
//! against mocks.

pub mod entities;
mod todo_repository;
mod user_repository;

pub use todo_repository::{TodoRepository, TodoStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use todo_repository::MockTodoRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
