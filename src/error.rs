//! Error types for easysqlite.
//!
//! Every operation returns [`Result`], so "no rows" (`Ok(vec![])`) and
//! "the engine refused the statement" (`Err(Error::Engine(..))`) stay
//! distinguishable.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The database file could not be opened or configured.
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Statement preparation or execution failed inside SQLite.
    #[error("Query execution error: {0}")]
    Engine(#[from] rusqlite::Error),

    /// The table is not present in the schema cache.
    #[error("Table not found in db: {0}")]
    TableNotFound(String),

    /// A row was written to an unknown table without naming its columns.
    #[error("No columns given for new table: {0}")]
    MissingColumns(String),

    /// A batch row does not have one value per target column.
    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the error came from SQLite itself rather than this layer.
    pub fn is_engine(&self) -> bool {
        matches!(self, Error::Engine(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
