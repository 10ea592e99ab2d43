//! Tracing subscriber setup.

use crate::config::LogLevel;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG` when set, otherwise the configured level for this crate and the HTTP layers.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

pub fn default_directives(level: LogLevel) -> String {
    let level = level.as_directive();
    format!("web_template={level},tower_http={level},warn")
}

/// Subscriber used while settings are still being resolved, before the configured level is known.
pub fn bootstrap() -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt().with_env_filter(env_filter(LogLevel::Info)).finish()
}

/// Install the global fmt subscriber. Call once, before serving.
pub fn init(level: LogLevel) {
    tracing_subscriber::fmt().with_env_filter(env_filter(level)).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_follow_configured_level() {
        assert_eq!(default_directives(LogLevel::Debug), "web_template=debug,tower_http=debug,warn");
        assert!(EnvFilter::try_new(default_directives(LogLevel::Warn)).is_ok());
    }

    #[test]
    fn bootstrap_subscriber_records_events_while_scoped() {
        let enabled = tracing::subscriber::with_default(bootstrap(), || tracing::enabled!(tracing::Level::ERROR));
        assert!(enabled);
    }
}
