//! Database configuration.
//!
//! Mirrors the pool configuration builder: construct with a path, then chain
//! setters. File databases get the performance pragmas applied on open;
//! `:memory:` databases are left at SQLite defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Path that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

/// SQLite `journal_mode` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    Wal,
    Off,
}

impl JournalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

/// SQLite `synchronous` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Synchronous {
    Off,
    Normal,
    Full,
    Extra,
}

impl Synchronous {
    pub fn as_str(&self) -> &'static str {
        match self {
            Synchronous::Off => "OFF",
            Synchronous::Normal => "NORMAL",
            Synchronous::Full => "FULL",
            Synchronous::Extra => "EXTRA",
        }
    }
}

/// Connection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database path (or `:memory:`)
    pub path: String,
    pub journal_mode: JournalMode,
    pub synchronous: Synchronous,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout_ms: u32,
    /// Page cache size in KiB
    pub cache_size_kib: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: MEMORY_PATH.to_string(),
            journal_mode: JournalMode::Wal,
            synchronous: Synchronous::Normal,
            busy_timeout_ms: 5000,
            cache_size_kib: 64000,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MEMORY_PATH)
    }

    /// Parse a database URL: `sqlite://path`, `sqlite:path`, or a bare path.
    ///
    /// `sqlite://` with nothing after it selects an in-memory database.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::Config("empty database URL".to_string()));
        }

        if let Some(rest) = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
        {
            let path = if rest.is_empty() { MEMORY_PATH } else { rest };
            return Ok(Self::new(path));
        }

        if let Some((scheme, _)) = url.split_once("://") {
            return Err(Error::Config(format!(
                "Unsupported database URL scheme: {}",
                scheme
            )));
        }

        Ok(Self::new(url))
    }

    pub fn journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    pub fn synchronous(mut self, mode: Synchronous) -> Self {
        self.synchronous = mode;
        self
    }

    pub fn busy_timeout_ms(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    pub fn cache_size_kib(mut self, kib: u32) -> Self {
        self.cache_size_kib = kib;
        self
    }

    #[inline]
    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Pragma batch run right after a file database is opened.
    pub fn pragmas(&self) -> String {
        format!(
            "PRAGMA journal_mode={};
             PRAGMA synchronous={};
             PRAGMA busy_timeout={};
             PRAGMA cache_size=-{};",
            self.journal_mode.as_str(),
            self.synchronous.as_str(),
            self.busy_timeout_ms,
            self.cache_size_kib,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_memory() {
        let config = DatabaseConfig::default();
        assert!(config.is_memory());
        assert_eq!(config.journal_mode, JournalMode::Wal);
        assert_eq!(config.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_builder() {
        let config = DatabaseConfig::new("app.db")
            .journal_mode(JournalMode::Delete)
            .synchronous(Synchronous::Full)
            .busy_timeout_ms(100)
            .cache_size_kib(2000);

        assert!(!config.is_memory());
        let pragmas = config.pragmas();
        assert!(pragmas.contains("journal_mode=DELETE"));
        assert!(pragmas.contains("synchronous=FULL"));
        assert!(pragmas.contains("busy_timeout=100"));
        assert!(pragmas.contains("cache_size=-2000"));
    }

    #[test]
    fn test_from_url() {
        assert_eq!(
            DatabaseConfig::from_url("sqlite://data/app.db").unwrap().path,
            "data/app.db"
        );
        assert_eq!(DatabaseConfig::from_url("sqlite:app.db").unwrap().path, "app.db");
        assert!(DatabaseConfig::from_url("sqlite://").unwrap().is_memory());
        assert!(DatabaseConfig::from_url("sqlite://:memory:").unwrap().is_memory());
        assert_eq!(DatabaseConfig::from_url("plain.db").unwrap().path, "plain.db");
    }

    #[test]
    fn test_from_url_rejects_other_schemes() {
        let err = DatabaseConfig::from_url("postgres://localhost/db").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(DatabaseConfig::from_url("  ").is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"path": "x.db", "journal_mode": "truncate"}"#).unwrap();
        assert_eq!(config.path, "x.db");
        assert_eq!(config.journal_mode, JournalMode::Truncate);
        assert_eq!(config.synchronous, Synchronous::Normal);
    }
}
