use crate::sql::{
    base::{
        adapter::{DatabaseKind, StorageBackend},
        error::{ConnectorError, DbError, is_already_exists},
    },
    sqlite::{batch::SqliteBatch, settings::SqliteSettings},
};
use rusqlite::{Connection, OptionalExtension, params_from_iter, types::Value};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
}

/// Single-connection SQLite store tuned for bulk inserts.
pub struct SqliteBackend {
    conn: Connection,
    location: String,
}

impl SqliteBackend {
    pub fn open(settings: &SqliteSettings) -> Result<Self, ConnectorError> {
        let location = settings.path.display().to_string();
        let conn = Connection::open(&settings.path).map_err(|source| ConnectorError::Open {
            location: location.clone(),
            source,
        })?;
        Self::configure(conn, location, settings)
    }

    /// Private in-memory database with the same tuning as `settings`.
    pub fn open_in_memory_with(settings: &SqliteSettings) -> Result<Self, ConnectorError> {
        let location = ":memory:".to_string();
        let conn = Connection::open_in_memory().map_err(|source| ConnectorError::Open {
            location: location.clone(),
            source,
        })?;
        Self::configure(conn, location, settings)
    }

    pub fn open_in_memory() -> Result<Self, ConnectorError> {
        Self::open_in_memory_with(&SqliteSettings::default())
    }

    fn configure(
        conn: Connection,
        location: String,
        settings: &SqliteSettings,
    ) -> Result<Self, ConnectorError> {
        let pragma = |pragma: &'static str, value: &str| {
            conn.execute_batch(&format!("PRAGMA {pragma} = {value};"))
                .map_err(|source| ConnectorError::Pragma {
                    pragma,
                    value: value.to_string(),
                    source,
                })
        };
        pragma("journal_mode", settings.journal_mode.pragma_value())?;
        pragma("synchronous", settings.synchronous.pragma_value())?;

        conn.busy_timeout(Duration::from_millis(settings.busy_timeout_ms))
            .map_err(|source| ConnectorError::Pragma {
                pragma: "busy_timeout",
                value: settings.busy_timeout_ms.to_string(),
                source,
            })?;

        info!(
            "Opened SQLite database {} (journal_mode={}, synchronous={}, busy_timeout={}ms)",
            location, settings.journal_mode, settings.synchronous, settings.busy_timeout_ms
        );
        Ok(SqliteBackend { conn, location })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn table_exists(&self, table: &str) -> Result<bool, DbError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Columns of `table` in declaration order; empty when the table is absent.
    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")?;
        let rows = stmt.query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                declared_type: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn row_count(&self, table: &str) -> Result<i64, DbError> {
        self.select_i64(&format!("SELECT COUNT(*) FROM {}", quote(table)), &[])
    }

    /// Runs a query whose first column of the first row is an integer.
    /// A query that yields no row is reported as `DbError::Unknown`.
    pub fn select_i64(&self, sql: &str, params: &[&str]) -> Result<i64, DbError> {
        let bound: Vec<Value> = params.iter().map(|p| Value::Text(p.to_string())).collect();
        self.conn
            .query_row(sql, params_from_iter(bound), |row| row.get::<_, i64>(0))
            .optional()?
            .ok_or_else(|| DbError::Unknown(format!("Query returned no rows: {sql}")))
    }
}

impl StorageBackend for SqliteBackend {
    type Batch<'a> = SqliteBatch<'a>;

    fn execute(&mut self, sql: &str) -> Result<usize, DbError> {
        debug!("Executing: {}", sql);
        self.conn.execute(sql, []).map_err(|err| {
            if is_already_exists(&err) {
                DbError::AlreadyExists(err.to_string())
            } else {
                DbError::Sql(err)
            }
        })
    }

    fn prepare_batch(&mut self, sql: &str) -> Result<SqliteBatch<'_>, DbError> {
        SqliteBatch::prepare(&mut self.conn, sql)
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
    }
}

fn quote(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::base::batch::BatchStatement;

    fn backend() -> SqliteBackend {
        SqliteBackend::open_in_memory().unwrap()
    }

    #[test]
    fn test_execute_and_introspect() {
        let mut db = backend();
        db.execute("CREATE TABLE players (id INTEGER, name TEXT, score REAL)")
            .unwrap();

        assert!(db.table_exists("players").unwrap());
        assert!(!db.table_exists("missing").unwrap());
        let cols = db.table_columns("players").unwrap();
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[2].name, "score");
        assert_eq!(cols[2].declared_type, "REAL");
        assert_eq!(db.row_count("players").unwrap(), 0);
        assert!(db.table_columns("missing").unwrap().is_empty());
    }

    #[test]
    fn test_create_twice_reports_already_exists() {
        let mut db = backend();
        db.execute("CREATE TABLE t (a TEXT)").unwrap();
        let err = db.execute("CREATE TABLE t (a TEXT)").unwrap_err();
        assert!(matches!(err, DbError::AlreadyExists(_)));
    }

    #[test]
    fn test_text_params_take_column_affinity() {
        let mut db = backend();
        db.execute("CREATE TABLE t (n INTEGER, r REAL, s TEXT)").unwrap();
        {
            let mut batch = db.prepare_batch("INSERT INTO `t` (`n`,`r`,`s`) VALUES (?,?,?)").unwrap();
            batch
                .add_to_batch(vec!["7".into(), "2.5".into(), "x".into()])
                .unwrap();
            assert_eq!(batch.execute_batch().unwrap(), 1);
            batch.close().unwrap();
        }

        let kind: String = db
            .connection()
            .query_row("SELECT typeof(n) || typeof(r) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kind, "integerreal");
        assert_eq!(
            db.select_i64("SELECT n FROM t WHERE s = ?1", &["x"]).unwrap(),
            7
        );
    }

    #[test]
    fn test_select_i64_without_rows() {
        let mut db = backend();
        db.execute("CREATE TABLE t (a INTEGER)").unwrap();
        let err = db.select_i64("SELECT a FROM t", &[]).unwrap_err();
        assert!(matches!(err, DbError::Unknown(_)));
    }

    #[test]
    fn test_open_file_applies_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SqliteSettings::new(dir.path().join("load.sqlite"))
            .with_journal_mode(crate::sql::sqlite::settings::JournalMode::Wal);
        let db = SqliteBackend::open(&settings).unwrap();

        let mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode, "wal");
        assert!(db.location().ends_with("load.sqlite"));
        assert_eq!(db.kind(), DatabaseKind::Sqlite);
    }
}
