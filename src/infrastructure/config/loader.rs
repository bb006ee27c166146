use anyhow::{Context, Result};
use figment::providers::{Format, Serialized, Yaml};
use figment::value::Value as FigmentValue;
use figment::Figment;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

use super::environment::Environment;
use super::secrets::{load_secrets, SecretsLoad, SECRETS_FILE_NAME};
use crate::domain::errors::ConfigError;
use crate::domain::models::{SameSite, Settings, SettingsNamespace};
use crate::infrastructure::logging::SecretScrubber;

/// Optional YAML overrides, relative to the base directory
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SAVEUS_";

/// Environment variable holding the token signing key
pub const SIGNING_KEY_ENV: &str = "SECRET_KEY";

const SIGNING_KEY_PATH: &str = "SIMPLE_JWT.SIGNING_KEY";

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Typed settings, after every layer
    pub settings: Settings,
    /// Static settings with the secrets document injected
    pub namespace: SettingsNamespace,
    /// Outcome of the secrets load
    pub secrets: SecretsLoad,
    /// Static settings shadowed by secrets entries
    pub overridden: Vec<String>,
}

/// Resolve configuration for `base_dir` from an environment snapshot.
pub fn load_config(base_dir: impl AsRef<Path>, env: &Environment) -> Result<Config> {
    ConfigLoader::new(base_dir).load(env)
}

/// Configuration loader with hierarchical merging
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    base_dir: PathBuf,
    secrets_file: PathBuf,
    settings_file: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader for `base_dir` with the default file names and prefix
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            secrets_file: PathBuf::from(SECRETS_FILE_NAME),
            settings_file: Some(PathBuf::from(SETTINGS_FILE_NAME)),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different secrets file; relative paths resolve against the base directory
    #[must_use]
    pub fn with_secrets_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_file = path.into();
        self
    }

    /// Use a different YAML overrides file, or none
    #[must_use]
    pub fn with_settings_file(mut self, path: Option<PathBuf>) -> Self {
        self.settings_file = path;
        self
    }

    /// Use a different environment prefix
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolved path of the secrets file
    pub fn secrets_path(&self) -> PathBuf {
        self.base_dir.join(&self.secrets_file)
    }

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults resolved against the base directory
    /// 2. settings.yaml (optional)
    /// 3. secrets.json, injected into the namespace
    /// 4. Environment variables (SAVEUS_* prefix, `__` nests)
    /// 5. SECRET_KEY as the token signing key
    pub fn load(&self, env: &Environment) -> Result<Config> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(Settings::with_base_dir(&self.base_dir)));
        if let Some(ref settings_file) = self.settings_file {
            figment = figment.merge(Yaml::file(self.base_dir.join(settings_file)));
        }
        let declared: Settings = extract(&figment).context("Failed to resolve static settings")?;

        let secrets = load_secrets(self.secrets_path())?;

        let mut namespace = SettingsNamespace::from_settings(&declared)
            .context("Failed to build settings namespace")?;
        let overridden = namespace.inject(secrets.document.clone());

        let mut figment = Figment::from(Serialized::defaults(&namespace));
        for (key, raw) in env.prefixed(&self.env_prefix) {
            let path = key.replace("__", ".");
            tracing::debug!(key = %path, "environment override");
            let value = env_override_value(&namespace, key, raw);
            figment = figment.merge(Serialized::default(&path, value));
        }
        match env.get_non_empty(SIGNING_KEY_ENV) {
            Some(key) => figment = figment.merge(Serialized::default(SIGNING_KEY_PATH, key)),
            None => tracing::warn!("{SIGNING_KEY_ENV} is not set; token signing is unavailable"),
        }

        let settings: Settings =
            extract(&figment).context("Failed to apply secrets and environment overrides")?;

        Self::validate(&settings)?;

        tracing::info!(
            base_dir = %self.base_dir.display(),
            status = %secrets.status,
            overridden = overridden.len(),
            "configuration loaded"
        );

        Ok(Config {
            settings,
            namespace,
            secrets,
            overridden,
        })
    }

    /// Validate configuration after loading
    pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
        if !settings.debug && settings.allowed_hosts.is_empty() {
            return Err(ConfigError::EmptyAllowedHosts);
        }

        for origin in &settings.cors_allowed_origins {
            if !is_valid_origin(origin) {
                return Err(ConfigError::InvalidOrigin {
                    setting: "CORS_ALLOWED_ORIGINS",
                    origin: origin.clone(),
                });
            }
        }

        for origin in &settings.csrf_trusted_origins {
            if !is_valid_origin(origin) {
                return Err(ConfigError::InvalidOrigin {
                    setting: "CSRF_TRUSTED_ORIGINS",
                    origin: origin.clone(),
                });
            }
        }

        if settings.default_database().is_none() {
            return Err(ConfigError::MissingDefaultDatabase);
        }
        for (alias, db) in &settings.databases {
            if db.engine.trim().is_empty() {
                return Err(ConfigError::IncompleteDatabase {
                    alias: alias.clone(),
                    field: "ENGINE",
                });
            }
            if db.name.trim().is_empty() {
                return Err(ConfigError::IncompleteDatabase {
                    alias: alias.clone(),
                    field: "NAME",
                });
            }
        }

        let jwt = &settings.simple_jwt;
        if jwt.access_token_lifetime == 0 || jwt.access_token_lifetime >= jwt.refresh_token_lifetime {
            return Err(ConfigError::InvalidTokenLifetime(
                jwt.access_token_lifetime,
                jwt.refresh_token_lifetime,
            ));
        }

        if settings.csrf_cookie_samesite == SameSite::None && !settings.csrf_cookie_secure {
            return Err(ConfigError::InsecureSameSiteCookie);
        }

        for (alias, layer) in &settings.channel_layers {
            for host in &layer.config.hosts {
                if host.0.trim().is_empty() || host.1 == 0 {
                    return Err(ConfigError::InvalidChannelHost {
                        alias: alias.clone(),
                        host: host.0.clone(),
                        port: host.1,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Extract settings, scrubbing secret-looking text out of the error.
fn extract(figment: &Figment) -> Result<Settings> {
    figment.extract().map_err(|err| {
        let scrubber = SecretScrubber::new();
        let messages: Vec<String> = err
            .into_iter()
            .map(|e| scrubber.scrub_message(&e.to_string()))
            .collect();
        anyhow::anyhow!(messages.join("; "))
    })
}

/// Value of a `SAVEUS_*` override.
///
/// Overrides of text settings, unset optional settings and unknown keys
/// are taken verbatim. Anything else goes through figment's value parser,
/// so `true`, `3306` and `[a, b]` are typed.
fn env_override_value(namespace: &SettingsNamespace, key: &str, raw: &str) -> FigmentValue {
    let mut segments = key.split("__");
    let current = segments.next().and_then(|first| {
        segments.try_fold(namespace.get(first)?, |value, segment| value.get(segment))
    });

    match current {
        None | Some(JsonValue::String(_) | JsonValue::Null) => FigmentValue::from(raw),
        Some(_) => raw
            .parse()
            .unwrap_or_else(|_| FigmentValue::from(raw)),
    }
}

/// Whether `origin` is `http(s)://host[:port]` with nothing after it.
fn is_valid_origin(origin: &str) -> bool {
    let Some(authority) = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
    else {
        return false;
    };

    if authority.is_empty() || authority.contains(['/', '?', '#', '@', ' ']) {
        return false;
    }

    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };

    if host.is_empty()
        || !host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    port.is_none_or(|port| port.parse::<u16>().is_ok_and(|p| p != 0))
}
