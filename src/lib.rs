//! saveus-settings - startup configuration for the saveus backend
//!
//! Resolves the backend settings from programmatic defaults, an optional
//! `settings.yaml`, a `secrets.json` document injected into the settings
//! namespace, and environment overrides.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): typed settings schema, namespace, errors
//! - **Infrastructure Layer** (`infrastructure`): secrets loading, config
//!   layering with figment, logging
//! - **CLI Layer** (`cli`): operator commands
//!
//! # Example
//!
//! ```no_run
//! use saveus_settings::{load_config, Environment};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = load_config("/srv/saveus", &Environment::from_process())?;
//!     let key = config.settings.require_signing_key()?;
//!     assert!(!key.expose().is_empty());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{
    DatabaseConfig, JwtAlgorithm, SameSite, Secret, SecretsDocument, Settings, SettingsNamespace,
    SimpleJwtConfig,
};
pub use domain::ConfigError;
pub use infrastructure::config::{
    load_config, load_secrets, read_secrets, Config, ConfigLoader, Environment, SecretsError,
    SecretsLoad, SecretsStatus,
};
pub use infrastructure::logging::{LogConfig, LoggerImpl, SecretScrubber};
