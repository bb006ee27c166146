use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::secret::Secret;
use crate::domain::errors::ConfigError;

/// Typed view of the backend settings.
///
/// Field names serialize in Django's `SCREAMING_SNAKE_CASE`, so the same
/// names are used by `settings.yaml`, `secrets.json`, `SAVEUS_*` variables
/// and the [`SettingsNamespace`](super::namespace::SettingsNamespace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct Settings {
    /// Site id used by `django.contrib.sites`
    pub site_id: u32,

    /// Debug mode
    pub debug: bool,

    /// Host names the backend answers to
    pub allowed_hosts: Vec<String>,

    /// Django secret key, normally supplied by `secrets.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<Secret>,

    /// Installed application labels
    pub installed_apps: Vec<String>,

    /// Middleware stack, outermost first
    pub middleware: Vec<String>,

    /// Channel layers by alias
    pub channel_layers: BTreeMap<String, ChannelLayerConfig>,

    /// ASGI entry point
    pub asgi_application: String,

    /// WSGI entry point
    pub wsgi_application: String,

    /// Root URL configuration module
    pub root_urlconf: String,

    /// Origins allowed to make cross-site requests
    pub cors_allowed_origins: Vec<String>,

    /// Whether cross-site requests may carry credentials
    pub cors_allow_credentials: bool,

    /// Request headers allowed on cross-site requests
    pub cors_allow_headers: Vec<String>,

    /// Origins trusted for unsafe requests
    pub csrf_trusted_origins: Vec<String>,

    /// Whether the CSRF cookie is hidden from scripts
    pub csrf_cookie_httponly: bool,

    /// Whether the CSRF cookie is sent over HTTPS only
    pub csrf_cookie_secure: bool,

    /// Store the CSRF token in the session instead of a cookie
    pub csrf_use_sessions: bool,

    /// `SameSite` attribute of the CSRF cookie
    pub csrf_cookie_samesite: SameSite,

    /// Template engines
    pub templates: Vec<TemplateConfig>,

    /// Databases by alias
    pub databases: BTreeMap<String, DatabaseConfig>,

    /// Password validators, applied in order
    pub auth_password_validators: Vec<PasswordValidator>,

    /// Default language
    pub language_code: String,

    /// Default time zone
    pub time_zone: String,

    /// Enable translation
    pub use_i18n: bool,

    /// Enable localized formatting
    pub use_l10n: bool,

    /// Store timezone-aware datetimes
    pub use_tz: bool,

    /// URL prefix for static files
    pub static_url: String,

    /// Directory static files are collected into
    pub static_root: PathBuf,

    /// Extra static file source directories
    pub staticfiles_dirs: Vec<PathBuf>,

    /// Static file storage backend
    pub staticfiles_storage: String,

    /// Default primary key field type
    pub default_auto_field: String,

    /// REST framework settings
    pub rest_framework: RestFrameworkConfig,

    /// Name of the access-token cookie
    pub jwt_auth_cookie: String,

    /// Name of the refresh-token cookie
    pub jwt_auth_refresh_cookie: String,

    /// Issue JWTs from the REST auth endpoints
    pub rest_use_jwt: bool,

    /// Token lifetimes and signing parameters
    pub simple_jwt: SimpleJwtConfig,

    /// Social login provider configuration, passed through verbatim
    pub socialaccount_providers: BTreeMap<String, serde_json::Value>,

    /// Authentication backends, tried in order
    pub authentication_backends: Vec<String>,
}

impl Settings {
    /// Default settings with paths resolved against `base_dir`.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base_dir = base_dir.as_ref();
        let frontend_dist = base_dir.join("../FRONT").join("dist");

        Self {
            site_id: 3,
            debug: false,
            allowed_hosts: strings(&[
                "127.0.0.1",
                "localhost",
                "3.35.141.132",
                "ec2-3-35-141-132.ap-northeast-2.compute.amazonaws.com",
                "young-jii.github.io",
                "jiyoung.pythonanywhere.com",
            ]),
            secret_key: None,
            installed_apps: strings(&[
                "corsheaders",
                "rest_framework",
                "rest_framework.authtoken",
                "django.contrib.sites",
                "django.contrib.auth",
                "django.contrib.contenttypes",
                "django.contrib.sessions",
                "django.contrib.messages",
                "django.contrib.staticfiles",
                "django.contrib.admin",
                "dj_rest_auth",
                "dj_rest_auth.registration",
                "rest_framework_simplejwt",
                "main",
                "map",
                "odsay",
                "card",
                "calculate",
            ]),
            middleware: strings(&[
                "corsheaders.middleware.CorsMiddleware",
                "django.middleware.security.SecurityMiddleware",
                "whitenoise.middleware.WhiteNoiseMiddleware",
                "django.middleware.common.CommonMiddleware",
                "django.middleware.clickjacking.XFrameOptionsMiddleware",
                "django.contrib.sessions.middleware.SessionMiddleware",
                "django.contrib.auth.middleware.AuthenticationMiddleware",
                "django.contrib.messages.middleware.MessageMiddleware",
            ]),
            channel_layers: BTreeMap::from([("default".to_string(), ChannelLayerConfig::default())]),
            asgi_application: "saveus.asgi.application".to_string(),
            wsgi_application: "saveus.wsgi.application".to_string(),
            root_urlconf: "saveus.urls".to_string(),
            cors_allowed_origins: default_origins(),
            cors_allow_credentials: true,
            cors_allow_headers: default_cors_headers(),
            csrf_trusted_origins: default_origins(),
            csrf_cookie_httponly: false,
            csrf_cookie_secure: true,
            csrf_use_sessions: true,
            csrf_cookie_samesite: SameSite::None,
            templates: vec![TemplateConfig {
                dirs: vec![frontend_dist.clone()],
                ..TemplateConfig::default()
            }],
            databases: BTreeMap::from([("default".to_string(), DatabaseConfig::default())]),
            auth_password_validators: [
                "UserAttributeSimilarityValidator",
                "MinimumLengthValidator",
                "CommonPasswordValidator",
                "NumericPasswordValidator",
            ]
            .iter()
            .map(|name| PasswordValidator {
                name: format!("django.contrib.auth.password_validation.{name}"),
            })
            .collect(),
            language_code: "ko".to_string(),
            time_zone: "Asia/Seoul".to_string(),
            use_i18n: true,
            use_l10n: true,
            use_tz: true,
            static_url: "/static/".to_string(),
            static_root: base_dir.join("staticfiles"),
            staticfiles_dirs: vec![frontend_dist],
            staticfiles_storage: "whitenoise.storage.CompressedManifestStaticFilesStorage"
                .to_string(),
            default_auto_field: "django.db.models.BigAutoField".to_string(),
            rest_framework: RestFrameworkConfig::default(),
            jwt_auth_cookie: "sociallogin-auth".to_string(),
            jwt_auth_refresh_cookie: "sociallogin-refresh-token".to_string(),
            rest_use_jwt: true,
            simple_jwt: SimpleJwtConfig::default(),
            socialaccount_providers: BTreeMap::new(),
            authentication_backends: strings(&["django.contrib.auth.backends.ModelBackend"]),
        }
    }

    /// Token signing key, `None` when absent or blank.
    pub fn signing_key(&self) -> Option<&Secret> {
        self.simple_jwt
            .signing_key
            .as_ref()
            .filter(|key| !key.is_blank())
    }

    /// Token signing key for code paths that sign tokens.
    pub fn require_signing_key(&self) -> Result<&Secret, ConfigError> {
        self.signing_key().ok_or(ConfigError::MissingSigningKey)
    }

    /// The `default` database, if configured.
    pub fn default_database(&self) -> Option<&DatabaseConfig> {
        self.databases.get("default")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_base_dir(".")
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn default_origins() -> Vec<String> {
    strings(&[
        "https://young-jii.github.io",
        "https://jiyoung.pythonanywhere.com",
        "http://localhost:8080",
        "http://127.0.0.1:8080",
        "https://3.35.141.132",
        "https://ec2-3-35-141-132.ap-northeast-2.compute.amazonaws.com",
    ])
}

fn default_cors_headers() -> Vec<String> {
    strings(&[
        // corsheaders defaults
        "accept",
        "authorization",
        "content-type",
        "user-agent",
        "x-csrftoken",
        "x-requested-with",
        "Access-Control-Allow-Credentials",
        "Access-Control-Allow-Origin",
        "Access-Control-Allow-Methods",
    ])
}

/// `SameSite` cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    /// Sent on top-level navigations and same-site requests
    Lax,
    /// Sent on same-site requests only
    Strict,
    /// Sent on all requests; browsers require `Secure`
    None,
}

/// Channel layer backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct ChannelLayerConfig {
    /// Backend class path
    pub backend: String,

    /// Backend options
    pub config: ChannelLayerOptions,
}

impl Default for ChannelLayerConfig {
    fn default() -> Self {
        Self {
            backend: "channels_redis.core.RedisChannelLayer".to_string(),
            config: ChannelLayerOptions::default(),
        }
    }
}

/// Options of a Redis channel layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelLayerOptions {
    /// Redis servers as `[host, port]` pairs
    pub hosts: Vec<RedisHost>,
}

impl Default for ChannelLayerOptions {
    fn default() -> Self {
        Self {
            hosts: vec![RedisHost("127.0.0.1".to_string(), 6379)],
        }
    }
}

/// A Redis `(host, port)` pair, serialized as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisHost(pub String, pub u16);

/// Template engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct TemplateConfig {
    /// Engine class path
    pub backend: String,

    /// Template directories searched before app directories
    pub dirs: Vec<PathBuf>,

    /// Search `templates/` inside installed apps
    pub app_dirs: bool,

    /// Engine options
    pub options: TemplateOptions,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            backend: "django.template.backends.django.DjangoTemplates".to_string(),
            dirs: Vec::new(),
            app_dirs: true,
            options: TemplateOptions::default(),
        }
    }
}

/// Template engine options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    /// Context processor paths
    pub context_processors: Vec<String>,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            context_processors: strings(&[
                "django.template.context_processors.debug",
                "django.template.context_processors.request",
                "django.contrib.auth.context_processors.auth",
                "django.contrib.messages.context_processors.messages",
            ]),
        }
    }
}

/// Database connection parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct DatabaseConfig {
    /// Backend engine path
    pub engine: String,

    /// Database name
    pub name: String,

    /// Login user
    pub user: String,

    /// Login password, normally supplied by `secrets.json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<Secret>,

    /// Server host
    pub host: String,

    /// Server port; accepts `3306` or `"3306"`
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,

    /// Driver options
    pub options: DatabaseOptions,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            engine: "django.db.backends.mysql".to_string(),
            name: "saveus".to_string(),
            user: "admin".to_string(),
            password: None,
            host: "127.0.0.1".to_string(),
            port: 3306,
            options: DatabaseOptions::default(),
        }
    }
}

/// Database driver options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseOptions {
    /// SQL run on each new connection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_command: Option<String>,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            init_command: Some("SET sql_mode='STRICT_TRANS_TABLES'".to_string()),
        }
    }
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid port: {text:?}"))),
    }
}

/// Password validator entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PasswordValidator {
    /// Validator class path
    pub name: String,
}

/// REST framework settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct RestFrameworkConfig {
    /// Authentication classes, tried in order
    pub default_authentication_classes: Vec<String>,

    /// Permission classes, all must pass
    pub default_permission_classes: Vec<String>,
}

impl Default for RestFrameworkConfig {
    fn default() -> Self {
        Self {
            default_authentication_classes: strings(&[
                "rest_framework_simplejwt.authentication.JWTAuthentication",
                "rest_framework.authentication.TokenAuthentication",
            ]),
            default_permission_classes: strings(&["rest_framework.permissions.IsAuthenticated"]),
        }
    }
}

/// JWT signing algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JwtAlgorithm {
    /// HMAC with SHA-256
    Hs256,
    /// HMAC with SHA-384
    Hs384,
    /// HMAC with SHA-512
    Hs512,
    /// RSA with SHA-256
    Rs256,
    /// RSA with SHA-384
    Rs384,
    /// RSA with SHA-512
    Rs512,
}

impl JwtAlgorithm {
    /// Whether the algorithm signs with a shared secret.
    pub const fn is_symmetric(self) -> bool {
        matches!(self, Self::Hs256 | Self::Hs384 | Self::Hs512)
    }
}

/// Token lifetimes and signing parameters.
///
/// Lifetimes are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct SimpleJwtConfig {
    /// Access token lifetime in seconds
    pub access_token_lifetime: u64,

    /// Refresh token lifetime in seconds
    pub refresh_token_lifetime: u64,

    /// Signing algorithm
    pub algorithm: JwtAlgorithm,

    /// Signing key, taken from the `SECRET_KEY` environment variable
    pub signing_key: Option<Secret>,
}

impl SimpleJwtConfig {
    /// Access token lifetime
    pub const fn access_token_lifetime(&self) -> Duration {
        Duration::from_secs(self.access_token_lifetime)
    }

    /// Refresh token lifetime
    pub const fn refresh_token_lifetime(&self) -> Duration {
        Duration::from_secs(self.refresh_token_lifetime)
    }
}

impl Default for SimpleJwtConfig {
    fn default() -> Self {
        Self {
            access_token_lifetime: 60 * 60,
            refresh_token_lifetime: 2 * 24 * 60 * 60,
            algorithm: JwtAlgorithm::Hs256,
            signing_key: None,
        }
    }
}
