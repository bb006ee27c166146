//! Domain layer for settings resolution
//!
//! This module contains the typed settings schema, the configuration
//! namespace and their error types. It performs no I/O.

pub mod errors;
pub mod models;

// Re-export error types for convenient access
pub use errors::ConfigError;
