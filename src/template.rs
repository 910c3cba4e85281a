//! Statement templates.
//!
//! Builds the placeholder lists and the UNION ALL scaffold used for batched
//! inserts. Identifiers passed in here are expected to be scrubbed already.

/// `(?, ?, ..., ?)` with exactly `n` placeholders; `()` when `n == 0`.
pub fn placeholders(n: usize) -> String {
    format!("({})", vec!["?"; n].join(", "))
}

/// `(a, b, c)` for a column list. A single column renders as `(a)`.
pub fn column_list<S: AsRef<str>>(columns: &[S]) -> String {
    let names: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    format!("({})", names.join(", "))
}

/// Row scaffold for a multi-row `INSERT INTO .. SELECT`.
///
/// The first row carries `(?) AS col` aliases so SQLite names and types the
/// compound select from it; every further row adds a bare
/// `UNION ALL SELECT (?), ..` in the same column order. Parameters bind in
/// row-major order. Returns an empty string for zero rows.
///
/// SQLite caps compound selects (500 terms by default), so very large batches
/// are rejected by the engine.
pub fn union_scaffold<S: AsRef<str>>(columns: &[S], rows: usize) -> String {
    if rows == 0 {
        return String::new();
    }

    let first: Vec<String> = columns
        .iter()
        .map(|c| format!("(?) AS {}", c.as_ref()))
        .collect();
    let mut sql = format!("SELECT {}", first.join(", "));

    let bare = vec!["(?)"; columns.len()].join(", ");
    for _ in 1..rows {
        sql.push_str("\nUNION ALL SELECT ");
        sql.push_str(&bare);
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_counts() {
        for n in 0..20 {
            let p = placeholders(n);
            assert_eq!(p.matches('?').count(), n);
            assert!(p.starts_with('('));
            assert!(p.ends_with(')'));
            assert_eq!(p.matches('(').count(), 1);
            assert_eq!(p.matches(')').count(), 1);
            assert!(!p.contains(",)"));
        }
    }

    #[test]
    fn test_placeholders_literal() {
        assert_eq!(placeholders(0), "()");
        assert_eq!(placeholders(1), "(?)");
        assert_eq!(placeholders(3), "(?, ?, ?)");
    }

    #[test]
    fn test_column_list() {
        assert_eq!(column_list(&["a"]), "(a)");
        assert_eq!(column_list(&["a", "b"]), "(a, b)");
        assert_eq!(column_list::<&str>(&[]), "()");
    }

    #[test]
    fn test_union_scaffold_single_row() {
        assert_eq!(union_scaffold(&["a", "b"], 1), "SELECT (?) AS a, (?) AS b");
    }

    #[test]
    fn test_union_scaffold_three_rows() {
        let sql = union_scaffold(&["a", "b"], 3);
        assert_eq!(
            sql,
            "SELECT (?) AS a, (?) AS b\nUNION ALL SELECT (?), (?)\nUNION ALL SELECT (?), (?)"
        );
        assert_eq!(sql.matches("UNION ALL").count(), 2);
        assert_eq!(sql.matches('?').count(), 6);
        assert_eq!(sql.matches(" AS ").count(), 2);
    }

    #[test]
    fn test_union_scaffold_empty() {
        assert_eq!(union_scaffold(&["a"], 0), "");
    }
}
