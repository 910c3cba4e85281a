//! Query results.
//!
//! Rows are stored as `SmallVec`, which keeps rows of up to 16 columns inline
//! with no extra heap allocation per row.

use smallvec::SmallVec;

use crate::sqlite::Value;

/// One result row, values in column order.
pub type Row = SmallVec<[Value; 16]>;

/// Result from executing a SQL query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column names
    pub columns: Vec<String>,
    /// Row data
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value at `row` for the named column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Rows as a JSON array of objects keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .zip(row.iter())
                    .map(|(col, val)| (col.clone(), val.to_json()))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn sample() -> QueryResult {
        QueryResult::new(
            vec!["id".to_string(), "name".to_string()],
            vec![
                smallvec![Value::Integer(1), Value::from("a")],
                smallvec![Value::Integer(2), Value::Null],
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let result = sample();
        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.column_index("name"), Some(1));
        assert_eq!(result.get(0, "name"), Some(&Value::from("a")));
        assert_eq!(result.get(5, "name"), None);
        assert_eq!(result.get(0, "missing"), None);
    }

    #[test]
    fn test_to_json() {
        let json = sample().to_json();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 1, "name": "a"},
                {"id": 2, "name": null},
            ])
        );
    }

    #[test]
    fn test_empty() {
        let result = QueryResult::default();
        assert!(result.is_empty());
        assert_eq!(result.to_json(), serde_json::json!([]));
    }
}
