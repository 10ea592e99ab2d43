//! Thin connection wrapper. No driver is wired in: `query` yields no rows and `non_query` reports one affected row.

use crate::config::{DatabaseSettings, Secret};
use crate::error::DbError;
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[derive(Debug)]
pub struct Connection {
    dsn: String,
    user: String,
    #[allow(dead_code)]
    password: Secret,
}

impl Connection {
    pub fn open(settings: &DatabaseSettings) -> Result<Self, DbError> {
        if settings.dsn.trim().is_empty() {
            return Err(DbError::Connection("empty dsn".into()));
        }
        tracing::debug!(dsn = %settings.dsn, user = %settings.user, "connection created");
        Ok(Connection {
            dsn: settings.dsn.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
        })
    }

    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// SELECT returning rows as JSON objects.
    pub fn query(&self, sql: &str, params: &[&str]) -> Result<Vec<Row>, DbError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        Ok(Vec::new())
    }

    /// INSERT/UPDATE/DELETE returning the affected row count.
    pub fn non_query(&self, sql: &str, params: &[&str]) -> Result<u64, DbError> {
        tracing::debug!(sql = %sql, params = ?params, "non_query");
        Ok(1)
    }
}
