//! Student progress tracker application layer.
//!
//! Wires the domain crate, the REST store, toasts and the assistant into
//! page controllers, and loads configuration for the `tracker` binary.

pub mod config;
pub mod error;
pub mod pages;

pub use config::{AppConfig, ConfigError};
pub use error::{AppError, AppResult};
