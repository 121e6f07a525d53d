//! Configuration module for the theme build tool
//!
//! Provides types and parsing for `bootscore.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{default_config, load_config, ConfigError};
pub use schema::*;
