//! Application configuration
//!
//! Environment-driven settings plus the defaults and limits they fall back to.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
