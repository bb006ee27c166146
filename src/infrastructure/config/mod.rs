//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - Secrets file loading with empty-document fallback
//! - Optional YAML overrides
//! - Environment snapshot and variable overrides
//! - Configuration validation

pub mod environment;
pub mod loader;
pub mod secrets;

pub use crate::domain::errors::ConfigError;
pub use environment::{Environment, DOTENV_FILE_NAME};
pub use loader::{
    load_config, Config, ConfigLoader, ENV_PREFIX, SETTINGS_FILE_NAME, SIGNING_KEY_ENV,
};
pub use secrets::{
    load_secrets, read_secrets, SecretsError, SecretsLoad, SecretsStatus, SECRETS_FILE_NAME,
};
