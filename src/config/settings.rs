//! Resolved settings: typed, validated and immutable once built.

use crate::config::env::Environment;
use crate::config::source::{RawConfigSource, DEFAULT_SECTION};
use crate::error::{ConfigError, FieldError};
use ::config::Config;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A value that must never appear in logs or diagnostic dumps.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(********)")
    }
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("********")
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret)
    }
}

/// Log verbosity as written in config (`warning` and `critical` are accepted spellings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" | "critical" => Ok(LogLevel::Error),
            other => Err(format!(
                "unknown log level `{}` (expected trace, debug, info, warning, error or critical)",
                other
            )),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        value.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            log_level: default_log_level(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentASettings {
    #[serde(default)]
    pub comp_a_variable: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_dsn")]
    pub dsn: String,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default = "default_db_password")]
    pub password: Secret,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            dsn: default_dsn(),
            user: default_db_user(),
            password: default_db_password(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_workers() -> usize {
    2
}
fn default_log_level() -> LogLevel {
    LogLevel::Info
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}
fn default_dsn() -> String {
    "db-host:1521/ORCLCDB".into()
}
fn default_db_user() -> String {
    "user".into()
}
fn default_db_password() -> Secret {
    Secret::new("password")
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Active deployment profile.
    pub app_env: String,
    /// Declared in the config file only; see `ApiVersion::resolve` for the env fallback.
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub secret_variable: Option<Secret>,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub component_a: ComponentASettings,
    #[serde(default)]
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// Runtime worker threads; development always runs a single worker.
    pub fn effective_workers(&self) -> usize {
        if self.is_development() {
            1
        } else {
            self.server.workers
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Range checks serde cannot express. Every failing field is reported.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let mut reject = |field: &'static str, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };
        if self.server.host.trim().is_empty() {
            reject("server.host", "must not be empty");
        }
        if self.server.port == 0 {
            reject("server.port", "must not be 0");
        }
        if self.server.workers == 0 {
            reject("server.workers", "must be at least 1");
        }
        if self.server.max_body_bytes == 0 {
            reject("server.max_body_bytes", "must be at least 1");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Maps a settings key to its place in the config file and its environment aliases.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub section: &'static str,
    pub option: &'static str,
    /// Checked in order; the first one set wins over the file.
    pub env: &'static [&'static str],
}

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "app_version",
        section: DEFAULT_SECTION,
        option: "app_version",
        env: &[],
    },
    FieldSpec {
        key: "server.host",
        section: "Server",
        option: "host",
        env: &["SERVER_HOST", "HOST"],
    },
    FieldSpec {
        key: "server.port",
        section: "Server",
        option: "port",
        env: &["SERVER_PORT", "PORT"],
    },
    FieldSpec {
        key: "server.workers",
        section: "Server",
        option: "workers",
        env: &["SERVER_WORKERS", "WORKERS"],
    },
    FieldSpec {
        key: "server.log_level",
        section: "Server",
        option: "log_level",
        env: &["LOG_LEVEL"],
    },
    FieldSpec {
        key: "server.max_body_bytes",
        section: "Server",
        option: "max_body_bytes",
        env: &["SERVER_MAX_BODY_BYTES"],
    },
    FieldSpec {
        key: "component_a.comp_a_variable",
        section: "ComponentA",
        option: "compA_variable",
        env: &["COMP_A_VARIABLE", "COMPA_VARIABLE"],
    },
    FieldSpec {
        key: "database.dsn",
        section: "Database",
        option: "dsn",
        env: &["DATABASE_DSN"],
    },
    FieldSpec {
        key: "database.user",
        section: "Database",
        option: "user",
        env: &["DATABASE_USER"],
    },
    FieldSpec {
        key: "database.password",
        section: "Database",
        option: "password",
        env: &["DATABASE_PASSWORD"],
    },
];

/// Build settings from the merged source. `app_env` and `secret` were already taken from the environment.
///
/// File values form the defaults layer, environment aliases the override layer; serde defaults fill
/// whatever neither provides.
pub fn build_settings<E: Environment + ?Sized>(
    source: &RawConfigSource,
    env: &E,
    app_env: String,
    secret: Option<Secret>,
) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder().set_override("app_env", app_env)?;
    for field in FIELDS {
        if let Some(value) = source.get(field.section, field.option)? {
            builder = builder.set_default(field.key, value)?;
        }
        if let Some(value) = env.first_of(field.env) {
            builder = builder.set_override(field.key, value)?;
        }
    }
    if let Some(secret) = secret {
        builder = builder.set_override("secret_variable", secret.expose().to_string())?;
    }

    let mut settings: Settings = builder.build()?.try_deserialize()?;
    settings.app_version = settings
        .app_version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    settings.validate()?;
    Ok(settings)
}
