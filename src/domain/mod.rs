//! Domain layer - Core business entities and logic
//!
//! Users, their todos, and password handling. Nothing here touches
//! the database or HTTP.

pub mod password;
pub mod todo;
pub mod user;

pub use password::Password;
pub use todo::{CreateTodo, Todo, UpdateTodo};
pub use user::{User, UserResponse};
