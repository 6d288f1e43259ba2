//! stockbook-config
//!
//! Persistent server and shell configuration.
//! Owns the Config data structure plus disk persistence and backup helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, CONFIG_KEYS};
