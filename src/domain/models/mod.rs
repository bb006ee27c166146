//! Domain models for settings resolution.

pub mod namespace;
pub mod secret;
pub mod settings;

pub use namespace::{SecretsDocument, SettingsNamespace};
pub use secret::{Secret, REDACTED};
pub use settings::{
    ChannelLayerConfig, ChannelLayerOptions, DatabaseConfig, DatabaseOptions, JwtAlgorithm,
    PasswordValidator, RedisHost, RestFrameworkConfig, SameSite, Settings, SimpleJwtConfig,
    TemplateConfig, TemplateOptions,
};
