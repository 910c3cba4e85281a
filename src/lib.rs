//! easysqlite - a small convenience layer over an embedded SQLite database.
//!
//! Opens or creates a database file, discovers its tables and their column
//! names, and offers helpers to create tables, insert one or many rows, and
//! run simple selects and deletes with optional conditions. Parsing,
//! storage and execution are all SQLite's; this crate only builds statements.
//!
//! ```rust,no_run
//! use easysqlite::{Database, Value};
//!
//! let db = Database::open("notes.db")?;
//! db.create_table("notes", &["id INTEGER", "body TEXT"])?;
//! db.insert("notes", &[Value::from(1), Value::from("hello")], None)?;
//! db.dump(
//!     "notes",
//!     &[
//!         vec![Value::from(2), Value::from("a")],
//!         vec![Value::from(3), Value::from("b")],
//!     ],
//!     None,
//! )?;
//!
//! let bodies = db.select("notes", Some("body".into()), Some("id > 1"))?;
//! assert_eq!(bodies.len(), 2);
//! # Ok::<(), easysqlite::Error>(())
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod executor;
pub mod schema;
pub mod scrub;
pub mod sqlite;
pub mod template;

pub use config::{DatabaseConfig, JournalMode, Synchronous};
pub use database::{ColumnList, Database};
pub use error::{Error, Result};
pub use executor::{QueryResult, Row};
pub use schema::SchemaCache;
pub use scrub::scrub;
pub use sqlite::Value;
pub use template::placeholders;
