#[cfg(test)]
mod tests {
    use crate::{
        PLAYERS_TSV, memory_db, numbered_rows, settings,
        utils::{
            assert_row_count, assert_table_exists, file_row_count, get_cell_as_string,
            get_cell_type, get_columns,
        },
        write_source,
    };
    use connectors::sql::base::adapter::StorageBackend;
    use engine_core::{
        error::IngestionError,
        loader::{ingest, ingest_file},
        settings::IngestSettingsBuilder,
    };
    use planner::statements::QuoteStyle;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    // Scenario: header `a\tb`, rows `1\tx`, `2\ty` and a one-cell line `bad`.
    // Expected Outcome:
    // - The table has columns `a INTEGER, b TEXT` and exactly 2 rows.
    // - One mismatch is counted and logged.
    #[traced_test]
    #[test]
    fn tc01() {
        let dir = tempdir().unwrap();
        let path = write_source(dir.path(), "ab.tsv", "a\tb\n1\tx\n2\ty\nbad\n");
        let mut db = memory_db();

        let report = ingest_file(&mut db, &path, "ab", &settings(100)).unwrap();

        assert_eq!(get_columns(&db, "ab"), vec!["a INTEGER", "b TEXT"]);
        assert_row_count(&db, "ab", 2);
        assert_eq!(report.counters.mismatched_rows, 1);
        assert!(logs_contain("expected 2 cells, found 1"));
    }

    // Scenario: header `id\tname\tscore` with rows whose first line is `1\tleo\t9.5`.
    // Expected Outcome: declared types follow the first row, and text parameters are
    // stored with the matching storage class through column affinity.
    #[test]
    fn tc02() {
        let mut db = memory_db();

        ingest(&mut db, PLAYERS_TSV.as_bytes(), "players", &settings(100)).unwrap();

        assert_eq!(
            get_columns(&db, "players"),
            vec!["id INTEGER", "name TEXT", "score REAL"]
        );
        assert_eq!(get_cell_type(&db, "players", "id", 1), "integer");
        assert_eq!(get_cell_type(&db, "players", "name", 1), "text");
        assert_eq!(get_cell_type(&db, "players", "score", 1), "real");
        // The sample row itself is loaded.
        assert_eq!(
            get_cell_as_string(&db, "SELECT name FROM players WHERE id = 1"),
            "leo"
        );
    }

    // Scenario: the same file is loaded twice into the same database.
    // Expected Outcome: the second run appends, so every row is present twice.
    #[traced_test]
    #[test]
    fn tc03() {
        let mut db = memory_db();

        let first = ingest(&mut db, PLAYERS_TSV.as_bytes(), "players", &settings(2)).unwrap();
        let second = ingest(&mut db, PLAYERS_TSV.as_bytes(), "players", &settings(2)).unwrap();

        assert!(!first.table_existed);
        assert!(second.table_existed);
        assert_row_count(&db, "players", 6);
        assert!(logs_contain("Table 'players' already exists"));
    }

    // Scenario: the destination already has a primary key and the second batch
    // contains a duplicate key.
    // Expected Outcome:
    // - The load fails with a batch error for batch 2.
    // - Rows of batch 1 stay committed; batch 2 is rolled back as a whole.
    #[test]
    fn tc04() {
        let mut db = memory_db();
        db.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, label TEXT)")
            .unwrap();
        let input = "id\tlabel\n1\ta\n2\tb\n3\tc\n1\tdup\n5\te\n";

        let err = ingest(&mut db, input.as_bytes(), "t", &settings(2)).unwrap_err();

        match &err {
            IngestionError::BatchExecution { batch, counters, .. } => {
                assert_eq!(*batch, 2);
                assert_eq!(counters.rows_inserted, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_row_count(&db, "t", 2);
        assert_eq!(err.counters().map(|c| c.batches_executed), Some(1));
    }

    // Scenario: a file with comment lines, blank lines and CRLF line endings.
    // Expected Outcome: every data line is loaded and none is counted as malformed.
    #[test]
    fn tc05() {
        let dir = tempdir().unwrap();
        let contents = "# exported nightly\r\nid\tcity\r\n\r\n1\tOslo\r\n# note\r\n2\tLima\r\n  \r\n3\tPune\r\n";
        let path = write_source(dir.path(), "cities.tsv", contents);
        let mut db = memory_db();

        let report = ingest_file(&mut db, &path, "cities", &settings(100)).unwrap();

        let expected = file_row_count(&path, '#').unwrap();
        assert_eq!(expected, 3);
        assert_row_count(&db, "cities", expected as i64);
        assert_eq!(report.counters.mismatched_rows, 0);
        assert_eq!(report.counters.blank_lines, 1);
        assert_eq!(
            get_cell_as_string(&db, "SELECT city FROM cities WHERE id = 3"),
            "Pune"
        );
    }

    // Scenario: more rows than the flush threshold.
    // Expected Outcome: ceil(rows / threshold) batches and every row stored.
    #[test]
    fn tc06() {
        let mut db = memory_db();
        let input = numbered_rows(2_500);

        let report = ingest(&mut db, input.as_bytes(), "bulk", &settings(1_000)).unwrap();

        assert_eq!(report.counters.batches_executed, 3);
        assert_eq!(report.counters.rows_inserted, 2_500);
        assert_row_count(&db, "bulk", 2_500);
    }

    // Scenario: a column named after a reserved word with the default quoting.
    // Expected Outcome: the bare CREATE TABLE is rejected, the insert cannot be
    // prepared either, and the DDL failure is what gets reported.
    #[test]
    fn tc07() {
        let mut db = memory_db();

        let err = ingest(&mut db, "order\n1\n".as_bytes(), "orders", &settings(10)).unwrap_err();

        assert!(matches!(err, IngestionError::CreateTable { .. }));
        assert_table_exists(&db, "orders", false);
    }

    // Scenario: the same reserved-word column with consistent quoting.
    // Expected Outcome: the table is created and loaded.
    #[test]
    fn tc08() {
        let mut db = memory_db();
        let settings = IngestSettingsBuilder::new()
            .quote_style(QuoteStyle::Consistent)
            .build()
            .unwrap();

        ingest(&mut db, "order\n1\n2\n".as_bytes(), "orders", &settings).unwrap();

        assert_eq!(get_columns(&db, "orders"), vec!["order INTEGER"]);
        assert_row_count(&db, "orders", 2);
    }

    // Scenario: the source file does not exist.
    // Expected Outcome: a source error and no table.
    #[test]
    fn tc09() {
        let dir = tempdir().unwrap();
        let mut db = memory_db();

        let err = ingest_file(&mut db, dir.path().join("nope.tsv"), "nope", &settings(10))
            .unwrap_err();

        assert!(matches!(err, IngestionError::Source(_)));
        assert_table_exists(&db, "nope", false);
    }

    // Scenario: the report of a finished load is serialized for the CLI.
    // Expected Outcome: counters and schema appear in the JSON.
    #[test]
    fn tc10() {
        let mut db = memory_db();

        let report = ingest(&mut db, PLAYERS_TSV.as_bytes(), "players", &settings(10)).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["table"], "players");
        assert_eq!(json["counters"]["rows_inserted"], 3);
        assert_eq!(json["schema"]["columns"][2]["data_type"], "REAL");
        assert_eq!(json["table_existed"], false);
    }
}
