//! SQLite connection implementation.

use rusqlite::Connection;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::executor::{QueryResult, Row};

use super::types::Value;

/// A single synchronous SQLite connection.
pub struct SqliteConnection {
    conn: Connection,
    path: String,
}

impl SqliteConnection {
    /// Open a SQLite database.
    ///
    /// Supports:
    /// - `:memory:` for in-memory database
    /// - File path for disk-based database (created if absent)
    ///
    /// File databases get the configured pragmas (WAL journal by default).
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = if config.is_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(|e| Error::Connection(format!("{}: {}", config.path, e)))?;

        if !config.is_memory() {
            conn.execute_batch(&config.pragmas())
                .map_err(|e| Error::Connection(format!("{}: {}", config.path, e)))?;
        }

        Ok(Self {
            conn,
            path: config.path.clone(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&DatabaseConfig::in_memory())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Execute a query and return results.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        debug!("query: {} with {} params", sql, params.len());
        let mut stmt = self.conn.prepare(sql)?;

        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();

        let mut rows_data = Vec::new();
        let mut rows = stmt.query(params_refs.as_slice())?;

        while let Some(row) = rows.next()? {
            let mut row_values = Row::with_capacity(columns.len());
            for i in 0..columns.len() {
                row_values.push(Value::from_value_ref(row.get_ref(i)?));
            }
            rows_data.push(row_values);
        }

        Ok(QueryResult::new(columns, rows_data))
    }

    /// Execute a statement that doesn't return rows. Returns rows affected.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize> {
        debug!("execute: {} with {} params", sql, params.len());
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params.iter().map(|p| p as &dyn rusqlite::ToSql).collect();

        Ok(self.conn.execute(sql, params_refs.as_slice())?)
    }

    /// Execute multiple statements (for DDL, etc.).
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Close the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Engine(e))
    }
}
