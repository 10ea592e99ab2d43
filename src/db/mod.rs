//! Database collaborator. Persistence is not designed yet; [`SqlDatabase`] answers with fixed
//! values and consumers must not rely on what it returns.

pub mod connection;

pub use connection::{Connection, Row};

use crate::config::DatabaseSettings;
use crate::error::DbError;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Timestamp layout bound into `TO_DATE(:2, 'YYYY-MM-DD HH24:MI:SS')`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const INSERT_SQL: &str =
    "INSERT INTO DBNAME (column1name, column2name) VALUES (:1, TO_DATE(:2, 'YYYY-MM-DD HH24:MI:SS'))";
pub const FIND_ROWS_SQL: &str = "SELECT * FROM DBNAME WHERE columnname = :1";
pub const EXISTS_SQL: &str = "SELECT 1 FROM DBNAME WHERE columnname = :1 FETCH FIRST 1 ROWS ONLY";

#[async_trait]
pub trait Database: Send + Sync {
    async fn insert(&self, value: &str, timestamp: NaiveDateTime) -> Result<u64, DbError>;
    async fn find_rows(&self, value: &str) -> Result<Vec<Row>, DbError>;
    async fn exists(&self, value: &str) -> Result<bool, DbError>;

    /// True while answers are stubs rather than real query results.
    fn is_placeholder(&self) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct SqlDatabase {
    conn: Connection,
}

impl SqlDatabase {
    pub fn connect(settings: &DatabaseSettings) -> Result<Self, DbError> {
        Ok(SqlDatabase {
            conn: Connection::open(settings)?,
        })
    }
}

#[async_trait]
impl Database for SqlDatabase {
    async fn insert(&self, value: &str, timestamp: NaiveDateTime) -> Result<u64, DbError> {
        let ts = timestamp.format(TIMESTAMP_FORMAT).to_string();
        self.conn.non_query(INSERT_SQL, &[value, &ts])
    }

    async fn find_rows(&self, value: &str) -> Result<Vec<Row>, DbError> {
        self.conn.query(FIND_ROWS_SQL, &[value])
    }

    async fn exists(&self, value: &str) -> Result<bool, DbError> {
        Ok(!self.conn.query(EXISTS_SQL, &[value])?.is_empty())
    }

    fn is_placeholder(&self) -> bool {
        true
    }
}
