//! Domain errors for settings resolution.

use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ALLOWED_HOSTS cannot be empty when DEBUG is false")]
    EmptyAllowedHosts,

    #[error("Invalid origin in {setting}: {origin:?}. Must be http(s)://host[:port] with no path")]
    InvalidOrigin { setting: &'static str, origin: String },

    #[error("DATABASES must define a 'default' database")]
    MissingDefaultDatabase,

    #[error("Database '{alias}' has an empty {field}")]
    IncompleteDatabase { alias: String, field: &'static str },

    #[error(
        "Invalid token lifetimes: ACCESS_TOKEN_LIFETIME ({0}s) must be positive and less than REFRESH_TOKEN_LIFETIME ({1}s)"
    )]
    InvalidTokenLifetime(u64, u64),

    #[error("CSRF_COOKIE_SAMESITE = None requires CSRF_COOKIE_SECURE = true")]
    InsecureSameSiteCookie,

    #[error("Channel layer '{alias}' has an invalid host entry: {host}:{port}")]
    InvalidChannelHost {
        alias: String,
        host: String,
        port: u16,
    },

    #[error("SECRET_KEY is not set; token signing is unavailable")]
    MissingSigningKey,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}
