//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Per-connection limits (LimitsConfig)
//! - [`validation`]: Startup checks run before binding

mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use types::Config;
pub use validation::validate;
