//! Command-line parsing (`serve`, `migrate`).

pub mod args;

pub use args::{Cli, Commands, MigrateAction, MigrateArgs, ServeArgs};
