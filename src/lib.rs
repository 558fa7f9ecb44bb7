//! Todo API: a multi-tenant todo list over HTTP.
//!
//! Users register with a login and password, exchange them for a signed
//! bearer token, and manage todo items only they can see. Axum serves the
//! HTTP side; SeaORM maps users and todos onto Postgres.
//!
//! Layering, outermost first:
//!
//! - `cli` / `commands`: `serve` and `migrate` subcommands
//! - `api`: routes, JWT middleware, request DTOs
//! - `services`: registration, login, per-user todo operations
//! - `infra`: pool, migrations, repositories, Unit of Work
//! - `domain`: `User`, `Todo`, `Password`
//! - `config`, `errors`: settings and the HTTP error mapping
//!
//! ```bash
//! # Applies pending migrations, then listens on SERVER_HOST:SERVER_PORT
//! cargo run -- serve --port 8080
//!
//! cargo run -- migrate status
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, Todo, User};
pub use errors::{AppError, AppResult};
pub use infra::Database;
