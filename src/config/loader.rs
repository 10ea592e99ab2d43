//! Settings resolution: config file, then profile overrides, then environment variables.

use crate::config::env::{Environment, ProcessEnv};
use crate::config::profile::apply_profile;
use crate::config::settings::{build_settings, Secret, Settings};
use crate::config::source::RawConfigSource;
use crate::error::ConfigError;
use std::path::Path;

/// Config file location, relative to the working directory.
pub const CONFIG_PATH: &str = "config/app.ini";
/// Selects the profile section to merge.
pub const PROFILE_ENV: &str = "APP_ENV";
pub const DEFAULT_PROFILE: &str = "development";
pub const PRODUCTION_PROFILE: &str = "production";
/// Read from the environment only; required in production.
pub const SECRET_ENV: &str = "SECRET_VARIABLE";

/// Resolve settings from [`CONFIG_PATH`] and the process environment. Call once at startup.
pub fn resolve() -> Result<Settings, ConfigError> {
    resolve_from(Path::new(CONFIG_PATH), &ProcessEnv)
}

pub fn resolve_from<E: Environment + ?Sized>(path: &Path, env: &E) -> Result<Settings, ConfigError> {
    let base = RawConfigSource::load(path)?;
    resolve_source(&base, env)
}

/// Same as [`resolve_from`] for an already loaded source.
pub fn resolve_source<E: Environment + ?Sized>(base: &RawConfigSource, env: &E) -> Result<Settings, ConfigError> {
    let profile = active_profile(env);
    let merged = apply_profile(base, &profile);

    let secret = env.var(SECRET_ENV).filter(|s| !s.is_empty()).map(Secret::new);
    if profile == PRODUCTION_PROFILE && secret.is_none() {
        return Err(ConfigError::MissingSecret {
            variable: SECRET_ENV,
            profile,
        });
    }

    let settings = build_settings(&merged, env, profile, secret)?;
    tracing::info!(profile = %settings.app_env, "settings resolved");
    Ok(settings)
}

/// Active profile name; unset or blank falls back to [`DEFAULT_PROFILE`].
pub fn active_profile<E: Environment + ?Sized>(env: &E) -> String {
    env.var(PROFILE_ENV)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}
