//! Application services layer - Use cases and business logic.
//!
//! Services depend on repository traits through the Unit of Work and are
//! exposed to the API layer as `Arc<dyn Trait>`.

mod auth_service;
pub mod container;
mod todo_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use todo_service::{TodoManager, TodoService};
