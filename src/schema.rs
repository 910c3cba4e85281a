//! Schema introspection.
//!
//! The cache maps each user table to its column names in declaration order.
//! Columns are recovered textually from the `CREATE TABLE` statement stored
//! in `sqlite_master`:
//! - take the body between the first `(` and the last `)`
//! - split it on `,`
//! - keep the first word of each piece, minus quoting
//!
//! This handles plain column lists, including typed columns such as
//! `VARCHAR(10)`. Bodies with commas inside nested parentheses
//! (`CHECK (a IN (1, 2))`, `DECIMAL(10, 2)`) or table-level constraints
//! (`PRIMARY KEY (a, b)`) produce bogus entries.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::sqlite::{SqliteConnection, Value};

/// All user tables; SQLite's internal `sqlite_*` tables are skipped.
pub const SQLITE_TABLES_QUERY: &str = r#"
SELECT name
FROM sqlite_master
WHERE type = 'table'
  AND name NOT LIKE 'sqlite_%'
ORDER BY name
"#;

/// Creation statement for one table.
pub const SQLITE_TABLE_SQL_QUERY: &str = r#"
SELECT sql
FROM sqlite_master
WHERE type = 'table'
  AND name = ?1
"#;

const QUOTE_CHARS: &[char] = &['\'', '"', '`', '[', ']'];

/// Table name → ordered column names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaCache {
    tables: BTreeMap<String, Vec<String>>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole cache with `names`, each with no known columns yet.
    pub fn reset<I: IntoIterator<Item = String>>(&mut self, names: I) {
        self.tables = names.into_iter().map(|n| (n, Vec::new())).collect();
    }

    pub fn set_columns(&mut self, table: &str, columns: Vec<String>) {
        if let Some(entry) = self.tables.get_mut(table) {
            *entry = columns;
        }
    }

    #[inline]
    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn columns(&self, table: &str) -> Option<&[String]> {
        self.tables.get(table).map(|c| c.as_slice())
    }

    /// Table names in sorted order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Column name of a single column definition: its first word, unquoted.
///
/// `"id INTEGER PRIMARY KEY"` → `id`, `'name' TEXT` → `name`.
pub fn column_name(definition: &str) -> Option<String> {
    let word = definition.split_whitespace().next()?;
    let name: String = word.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Column names declared by a `CREATE TABLE` statement, in order.
///
/// Returns an empty list when the statement has no parenthesized body.
pub fn parse_column_names(create_sql: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (create_sql.find('('), create_sql.rfind(')')) else {
        return Vec::new();
    };
    if close <= open {
        return Vec::new();
    }

    create_sql[open + 1..close]
        .split(',')
        .filter_map(column_name)
        .collect()
}

/// User table names from the catalog.
pub fn load_table_names(conn: &SqliteConnection) -> Result<Vec<String>> {
    let result = conn.query(SQLITE_TABLES_QUERY, &[])?;
    Ok(result
        .rows
        .into_iter()
        .filter_map(|row| match row.into_iter().next() {
            Some(Value::Text(name)) => Some(name),
            _ => None,
        })
        .collect())
}

/// Stored `CREATE TABLE` text for `table`, if the table exists.
pub fn load_table_sql(conn: &SqliteConnection, table: &str) -> Result<Option<String>> {
    let result = conn.query(SQLITE_TABLE_SQL_QUERY, &[Value::from(table)])?;
    Ok(result
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.into_iter().next())
        .and_then(|value| match value {
            Value::Text(sql) => Some(sql),
            _ => None,
        }))
}
