//! SeaORM entity definitions
//!
//! Database-specific entities, kept separate from the domain models.

pub mod todo;
pub mod user;

pub use todo::{ActiveModel as TodoActiveModel, Entity as TodoEntity, Model as TodoModel};
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
