//! Table and row operations over one SQLite connection.
//!
//! Each operation is a single statement. Table and column names are scrubbed
//! and spliced into the SQL text; row values are always bound as parameters.
//! Condition strings are scrubbed but **not** parameterized: they are caller
//! SQL, and anything beyond `;`/`--` removal is the caller's responsibility.

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::executor::{QueryResult, Row};
use crate::schema::{self, SchemaCache};
use crate::scrub::{scrub, scrub_all};
use crate::sqlite::{SqliteConnection, Value};
use crate::template::{column_list, placeholders, union_scaffold};

/// Column selection for [`Database::select`]: one name or several.
///
/// Blank names are dropped, so `""` selects like an omitted list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnList(Vec<String>);

impl ColumnList {
    fn new(columns: Vec<String>) -> Self {
        ColumnList(columns.into_iter().filter(|c| !c.trim().is_empty()).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ColumnList {
    fn from(column: &str) -> Self {
        ColumnList::new(vec![column.to_string()])
    }
}

impl From<String> for ColumnList {
    fn from(column: String) -> Self {
        ColumnList::new(vec![column])
    }
}

impl From<&[&str]> for ColumnList {
    fn from(columns: &[&str]) -> Self {
        ColumnList::new(columns.iter().map(|c| c.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnList {
    fn from(columns: [&str; N]) -> Self {
        ColumnList::new(columns.iter().map(|c| c.to_string()).collect())
    }
}

impl From<Vec<&str>> for ColumnList {
    fn from(columns: Vec<&str>) -> Self {
        columns.as_slice().into()
    }
}

impl From<Vec<String>> for ColumnList {
    fn from(columns: Vec<String>) -> Self {
        ColumnList::new(columns)
    }
}

/// An open database plus its schema cache.
///
/// The connection is guarded by a mutex, so a `Database` can be shared
/// between threads, but calls are serialized and each statement
/// auto-commits on its own. Lock order is always connection, then cache.
pub struct Database {
    conn: Mutex<SqliteConnection>,
    schema: RwLock<SchemaCache>,
    config: DatabaseConfig,
}

impl Database {
    /// Open (or create) the database file at `path` and load its schema.
    pub fn open(path: &str) -> Result<Self> {
        Self::open_with_config(DatabaseConfig::new(path))
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open_with_config(DatabaseConfig::in_memory())
    }

    pub fn open_with_config(config: DatabaseConfig) -> Result<Self> {
        let conn = SqliteConnection::open(&config).map_err(|e| {
            warn!("failed to open database {}: {}", config.path, e);
            e
        })?;
        info!("opened database {}", config.path);

        let db = Self {
            conn: Mutex::new(conn),
            schema: RwLock::new(SchemaCache::new()),
            config,
        };
        db.refresh_tables()?;
        Ok(db)
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Close the connection.
    pub fn close(self) -> Result<()> {
        let path = self.config.path;
        let result = self.conn.into_inner().close();
        match &result {
            Ok(()) => info!("closed database {}", path),
            Err(e) => warn!("failed to close database {}: {}", path, e),
        }
        result
    }

    /// Reload the table list from the catalog, then every table's columns.
    ///
    /// On failure the cache may be left partially rebuilt.
    pub fn refresh_tables(&self) -> Result<()> {
        let names = {
            let conn = self.conn.lock();
            schema::load_table_names(&conn)
        };
        let names = logged("refresh_tables", "sqlite_master", names)?;
        debug!("schema cache: {} tables", names.len());

        self.schema.write().reset(names);
        self.refresh_columns()
    }

    /// Reload column names for every table already in the cache.
    pub fn refresh_columns(&self) -> Result<()> {
        let tables = self.schema.read().table_names();
        let conn = self.conn.lock();

        for table in tables {
            let sql = logged("refresh_columns", &table, schema::load_table_sql(&conn, &table))?;
            let columns = sql
                .as_deref()
                .map(schema::parse_column_names)
                .unwrap_or_default();
            debug!("schema cache: {} -> {:?}", table, columns);
            self.schema.write().set_columns(&table, columns);
        }
        Ok(())
    }

    /// Cached table names, sorted.
    pub fn tables(&self) -> Vec<String> {
        self.schema.read().table_names()
    }

    /// Whether `table` is cached. The name is scrubbed first, like every
    /// name that reaches SQL.
    pub fn has_table(&self, table: &str) -> bool {
        self.schema.read().contains(&scrub(table))
    }

    /// Cached column order for `table`.
    pub fn columns(&self, table: &str) -> Option<Vec<String>> {
        self.schema.read().columns(&scrub(table)).map(|c| c.to_vec())
    }

    /// `CREATE TABLE IF NOT EXISTS table (columns..)`, then rebuild the cache.
    ///
    /// Column entries may carry a type and constraints (`"id INTEGER PRIMARY
    /// KEY"`). Creating a table that already exists changes nothing.
    pub fn create_table<S: AsRef<str>>(&self, table: &str, columns: &[S]) -> Result<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} {};",
            scrub(table),
            column_list(&scrub_all(columns))
        );

        let result = self.conn.lock().execute(&sql, &[]);
        logged("create_table", table, result)?;
        self.refresh_tables()
    }

    /// Insert one row.
    ///
    /// An unknown table is created from `columns` first; with no columns
    /// that is [`Error::MissingColumns`]. With `columns` omitted the cached
    /// column order is used.
    pub fn insert(&self, table: &str, row: &[Value], columns: Option<&[&str]>) -> Result<()> {
        let columns = self.resolve_write_columns(table, columns)?;

        let sql = format!(
            "INSERT INTO {} {} VALUES {};",
            scrub(table),
            column_list(&columns),
            placeholders(row.len())
        );

        let result = self.conn.lock().execute(&sql, row);
        logged("insert", table, result).map(|_| ())
    }

    /// Insert many rows with one `INSERT INTO .. SELECT .. UNION ALL ..`.
    ///
    /// Table and column resolution matches [`Database::insert`]. Every row
    /// must have exactly one value per column, otherwise nothing is written
    /// and [`Error::RowWidth`] names the first bad row. Returns the number of
    /// rows written.
    pub fn dump(&self, table: &str, rows: &[Vec<Value>], columns: Option<&[&str]>) -> Result<usize> {
        let columns = self.resolve_write_columns(table, columns)?;
        if rows.is_empty() {
            return Ok(0);
        }
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            warn!("dump into {}: row {} has {} values, expected {}", table, row, values.len(), columns.len());
            return Err(Error::RowWidth {
                row,
                found: values.len(),
                expected: columns.len(),
            });
        }

        let params: Vec<Value> = rows.iter().flatten().cloned().collect();
        let sql = format!(
            "INSERT INTO {} {}\n{};",
            scrub(table),
            column_list(&columns),
            union_scaffold(&columns, rows.len())
        );

        let result = self.conn.lock().execute(&sql, &params);
        logged("dump", table, result)
    }

    /// Scrubbed column names for a write, creating the table if needed.
    fn resolve_write_columns(&self, table: &str, columns: Option<&[&str]>) -> Result<Vec<String>> {
        let columns = columns.filter(|c| !c.is_empty());

        if !self.has_table(table) {
            match columns {
                Some(defs) => self.create_table(table, defs)?,
                None => {
                    warn!("insert into unknown table {} without columns", table);
                    return Err(Error::MissingColumns(table.to_string()));
                }
            }
        }

        let names: Vec<String> = match columns {
            Some(defs) => defs
                .iter()
                .filter_map(|d| schema::column_name(d))
                .collect(),
            None => self.columns(table).unwrap_or_default(),
        };
        Ok(scrub_all(&names))
    }

    /// Every row of `table`. An unknown table yields no rows.
    pub fn select_all(&self, table: &str) -> Result<Vec<Row>> {
        if !self.has_table(table) {
            debug!("select_all: unknown table {}", table);
            return Ok(Vec::new());
        }

        let sql = format!("SELECT * FROM {};", scrub(table));
        let result = self.conn.lock().query(&sql, &[]);
        logged("select_all", table, result).map(QueryResult::into_rows)
    }

    /// Selected columns of `table`, optionally filtered by `condition`.
    ///
    /// With `columns` omitted the cache is refreshed and the table's full
    /// column list is used; if the table does not exist this fails with
    /// [`Error::TableNotFound`]. With explicit columns an unknown table yields
    /// no rows.
    pub fn select(
        &self,
        table: &str,
        columns: Option<ColumnList>,
        condition: Option<&str>,
    ) -> Result<Vec<Row>> {
        let columns = match columns.filter(|c| !c.is_empty()) {
            Some(columns) => columns.0,
            None => {
                self.refresh_tables()?;
                self.columns(table)
                    .ok_or_else(|| Error::TableNotFound(table.to_string()))?
            }
        };

        if !self.has_table(table) {
            debug!("select: unknown table {}", table);
            return Ok(Vec::new());
        }

        let mut sql = format!(
            "SELECT {} FROM {}",
            scrub_all(&columns).join(", "),
            scrub(table)
        );
        if let Some(condition) = condition.filter(|c| !c.is_empty()) {
            sql.push_str(" WHERE ");
            sql.push_str(&scrub(condition));
        }
        sql.push(';');

        let result = self.conn.lock().query(&sql, &[]);
        logged("select", table, result).map(QueryResult::into_rows)
    }

    /// Run arbitrary SQL with bound parameters and return the full result.
    ///
    /// Nothing is scrubbed and the schema cache is not refreshed.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let result = self.conn.lock().query(sql, params);
        logged("query", "-", result)
    }

    /// Execute arbitrary SQL with bound parameters; returns rows affected.
    ///
    /// Nothing is scrubbed and the schema cache is not refreshed; call
    /// [`Database::refresh_tables`] after changing the schema this way.
    pub fn execute_raw(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let result = self.conn.lock().execute(sql, params);
        logged("execute_raw", "-", result)
    }

    /// Delete every row. `Ok(false)` when the table is unknown.
    pub fn delete_all(&self, table: &str) -> Result<bool> {
        self.delete(table, None)
    }

    /// Delete rows matching `condition`, or every row when it is `None`.
    /// `Ok(false)` when the table is unknown.
    pub fn delete(&self, table: &str, condition: Option<&str>) -> Result<bool> {
        if !self.has_table(table) {
            debug!("delete: unknown table {}", table);
            return Ok(false);
        }

        let mut sql = format!("DELETE FROM {}", scrub(table));
        if let Some(condition) = condition.filter(|c| !c.is_empty()) {
            sql.push_str(" WHERE ");
            sql.push_str(&scrub(condition));
        }
        sql.push(';');

        let result = self.conn.lock().execute(&sql, &[]);
        logged("delete", table, result).map(|_| true)
    }
}

/// Log an operation failure at the call boundary and pass the result on.
fn logged<T>(op: &str, table: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!("{} on {} failed: {}", op, table, e);
    }
    result
}
