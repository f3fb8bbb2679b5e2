use connectors::sql::sqlite::adapter::SqliteBackend;
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

pub fn assert_table_exists(db: &SqliteBackend, table: &str, should: bool) {
    let exists = db.table_exists(table).expect("check table");
    assert_eq!(
        exists, should,
        "expected table '{table}' to {}exist",
        if should { "" } else { "not " }
    );
}

pub fn assert_row_count(db: &SqliteBackend, table: &str, expected: i64) {
    let count = db.row_count(table).expect("count rows");
    assert_eq!(count, expected, "row count of '{table}'");
}

/// `name TYPE` pairs in declaration order.
pub fn get_columns(db: &SqliteBackend, table: &str) -> Vec<String> {
    db.table_columns(table)
        .expect("table columns")
        .into_iter()
        .map(|c| format!("{} {}", c.name, c.declared_type))
        .collect()
}

pub fn get_cell_as_string(db: &SqliteBackend, query: &str) -> String {
    db.connection()
        .query_row(query, [], |row| row.get(0))
        .expect("query cell")
}

/// SQLite storage class of a single cell, e.g. `integer` or `text`.
pub fn get_cell_type(db: &SqliteBackend, table: &str, column: &str, rowid: i64) -> String {
    let sql = format!("SELECT typeof(`{column}`) FROM `{table}` WHERE rowid = {rowid}");
    get_cell_as_string(db, &sql)
}

/// Lines in a source file that are neither empty, blank nor comments, header excluded.
pub fn file_row_count(path: &Path, comment: char) -> io::Result<usize> {
    let reader = BufReader::new(File::open(path)?);
    let mut count: usize = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with(comment) {
            continue;
        }
        count += 1;
    }
    Ok(count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_row_count_skips_header_comments_and_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# note\na\tb\n1\tx\n\n   \n# more\n2\ty\n").unwrap();

        assert_eq!(file_row_count(file.path(), '#').unwrap(), 2);
    }

    #[test]
    fn test_file_row_count_header_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\tb\n").unwrap();

        assert_eq!(file_row_count(file.path(), '#').unwrap(), 0);
    }
}
