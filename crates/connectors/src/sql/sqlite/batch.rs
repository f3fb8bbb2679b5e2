use crate::sql::base::{batch::BatchStatement, error::DbError};
use model::records::batch::BatchBuffer;
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, warn};

/// Batched INSERT against one SQLite connection.
///
/// Rows are buffered in memory and written inside a single transaction per
/// `execute_batch`, reusing the connection's cached prepared statement.
pub struct SqliteBatch<'conn> {
    conn: &'conn mut Connection,
    sql: String,
    expected_params: usize,
    buffer: BatchBuffer,
    closed: bool,
}

impl<'conn> SqliteBatch<'conn> {
    /// Compiles `sql` once up front so a bad template fails before any row is read.
    pub(crate) fn prepare(conn: &'conn mut Connection, sql: &str) -> Result<Self, DbError> {
        let expected_params = {
            let stmt = conn.prepare_cached(sql)?;
            stmt.parameter_count()
        };

        Ok(SqliteBatch {
            conn,
            sql: sql.to_string(),
            expected_params,
            buffer: BatchBuffer::unbounded(),
            closed: false,
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl BatchStatement for SqliteBatch<'_> {
    fn add_to_batch(&mut self, params: Vec<String>) -> Result<(), DbError> {
        if params.len() != self.expected_params {
            return Err(DbError::ParamCount {
                expected: self.expected_params,
                actual: params.len(),
            });
        }
        self.buffer.push(params);
        Ok(())
    }

    fn execute_batch(&mut self) -> Result<usize, DbError> {
        if self.buffer.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        let mut affected = 0;
        {
            let mut stmt = tx.prepare_cached(&self.sql)?;
            for row in self.buffer.rows() {
                affected += stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        debug!("Committed batch of {} rows", affected);
        Ok(affected)
    }

    fn clear_batch(&mut self) {
        self.buffer.clear();
    }

    fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn close(mut self) -> Result<(), DbError> {
        self.release();
        Ok(())
    }
}

impl SqliteBatch<'_> {
    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if !self.buffer.is_empty() {
            warn!(
                "Discarding {} rows that were never executed",
                self.buffer.len()
            );
            self.buffer.clear();
        }
    }
}

impl Drop for SqliteBatch<'_> {
    fn drop(&mut self) {
        self.release();
    }
}
