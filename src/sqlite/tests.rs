//! Tests for the SQLite driver.

use super::*;
use crate::config::DatabaseConfig;
use crate::error::Error;

#[test]
fn test_connection_open_memory() {
    let conn = SqliteConnection::open_in_memory().unwrap();
    assert_eq!(conn.path(), ":memory:");
}

#[test]
fn test_execute_and_query() {
    let conn = SqliteConnection::open_in_memory().unwrap();

    conn.execute(
        "CREATE TABLE test (id INTEGER PRIMARY KEY, name TEXT, value REAL)",
        &[],
    )
    .unwrap();

    let affected = conn
        .execute(
            "INSERT INTO test (name, value) VALUES (?, ?)",
            &[Value::Text("hello".to_string()), Value::Real(1.5)],
        )
        .unwrap();
    assert_eq!(affected, 1);

    let result = conn.query("SELECT * FROM test", &[]).unwrap();
    assert_eq!(result.columns, vec!["id", "name", "value"]);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0][1], Value::Text("hello".to_string()));
    assert_eq!(result.rows[0][2], Value::Real(1.5));
}

#[test]
fn test_null_and_blob_values() {
    let conn = SqliteConnection::open_in_memory().unwrap();

    conn.execute("CREATE TABLE test (id INTEGER, data BLOB)", &[])
        .unwrap();

    let data = vec![0xDE, 0xAD, 0xBE, 0xEF];
    conn.execute(
        "INSERT INTO test (id, data) VALUES (?, ?), (?, ?)",
        &[
            Value::Integer(1),
            Value::Null,
            Value::Integer(2),
            Value::Blob(data.clone()),
        ],
    )
    .unwrap();

    let result = conn.query("SELECT data FROM test ORDER BY id", &[]).unwrap();
    assert_eq!(result.rows[0][0], Value::Null);
    assert_eq!(result.rows[1][0], Value::Blob(data));
}

#[test]
fn test_engine_error_is_reported() {
    let conn = SqliteConnection::open_in_memory().unwrap();
    let err = conn.query("SELECT * FROM nowhere", &[]).unwrap_err();
    assert!(err.is_engine());
}

#[test]
fn test_file_database_gets_pragmas() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pragmas.db");
    let config = DatabaseConfig::new(path.to_str().unwrap());

    let conn = SqliteConnection::open(&config).unwrap();
    let result = conn.query("PRAGMA journal_mode", &[]).unwrap();
    assert_eq!(result.rows[0][0], Value::Text("wal".to_string()));
    conn.close().unwrap();
    assert!(path.exists());
}

#[test]
fn test_open_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/x.db");
    let config = DatabaseConfig::new(path.to_str().unwrap());

    let err = SqliteConnection::open(&config).err().unwrap();
    assert!(matches!(err, Error::Connection(_)));
}
