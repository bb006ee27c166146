//! Infrastructure layer module
//!
//! This module contains the parts that touch the outside world:
//! - Configuration loading (secrets file, YAML overrides, environment)
//! - Logging infrastructure

pub mod config;
pub mod logging;
