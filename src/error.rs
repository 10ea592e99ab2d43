//! Typed errors for startup and the database collaborator.

use std::path::PathBuf;
use thiserror::Error;

/// One rejected settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Startup-fatal configuration errors. The process must not start on any of these.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),
    /// Reading the file or deserializing the settings failed.
    #[error("config: {0}")]
    Source(#[from] ::config::ConfigError),
    #[error("option `{0}` appears before any section header")]
    Unsectioned(String),
    #[error("interpolation of [{section}] {option}: {message}")]
    Interpolation {
        section: String,
        option: String,
        message: String,
    },
    #[error("{variable} must be set in {profile}")]
    MissingSecret {
        variable: &'static str,
        profile: String,
    },
    #[error("configuration validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("connection: {0}")]
    Connection(String),
    #[error("query: {0}")]
    Query(String),
}

/// Errors that abort the binary before it serves traffic.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Db(#[from] DbError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
