use connectors::sql::base::{
    adapter::{DatabaseKind, StorageBackend},
    batch::BatchStatement,
    error::DbError,
};
use model::records::batch::BatchBuffer;
use std::collections::HashSet;

/// In-memory stand-in for a database that records every call made to it.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Statements passed to `execute`, in order.
    pub executed: Vec<String>,
    /// Templates passed to `prepare_batch`, in order.
    pub prepared: Vec<String>,
    /// Rows of every successfully executed batch.
    pub batches: Vec<Vec<Vec<String>>>,
    pub tables: HashSet<String>,
    /// 1-based number of the batch that should fail.
    pub fail_on_batch: Option<usize>,
    /// Every CREATE TABLE fails with this message.
    pub fail_ddl: Option<String>,
    pub fail_prepare: bool,
    pub closed: usize,
    /// Batch handles dropped without `close`.
    pub released_on_drop: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: &str) -> Self {
        self.tables.insert(table.to_string());
        self
    }

    pub fn failing_on_batch(mut self, batch: usize) -> Self {
        self.fail_on_batch = Some(batch);
        self
    }

    pub fn failing_ddl(mut self, message: &str) -> Self {
        self.fail_ddl = Some(message.to_string());
        self
    }

    pub fn failing_prepare(mut self) -> Self {
        self.fail_prepare = true;
        self
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.iter().map(Vec::len).collect()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.batches.iter().flatten().cloned().collect()
    }
}

/// Table name of a `CREATE TABLE <name> (...)` statement, unquoted.
fn created_table(sql: &str) -> Option<String> {
    let rest = sql.strip_prefix("CREATE TABLE ")?;
    let name = rest.split_whitespace().next()?;
    Some(name.trim_matches('`').to_string())
}

impl StorageBackend for RecordingBackend {
    type Batch<'a> = RecordingBatch<'a>;

    fn execute(&mut self, sql: &str) -> Result<usize, DbError> {
        self.executed.push(sql.to_string());

        if let Some(table) = created_table(sql) {
            if self.tables.contains(&table) {
                return Err(DbError::AlreadyExists(table));
            }
            if let Some(message) = &self.fail_ddl {
                return Err(DbError::Write(message.clone()));
            }
            self.tables.insert(table);
        }
        Ok(0)
    }

    fn prepare_batch(&mut self, sql: &str) -> Result<RecordingBatch<'_>, DbError> {
        self.prepared.push(sql.to_string());
        if self.fail_prepare {
            return Err(DbError::Write("no such table".to_string()));
        }
        Ok(RecordingBatch {
            backend: self,
            buffer: BatchBuffer::unbounded(),
            closed: false,
        })
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Other("recording".to_string())
    }
}

pub struct RecordingBatch<'a> {
    backend: &'a mut RecordingBackend,
    buffer: BatchBuffer,
    closed: bool,
}

impl BatchStatement for RecordingBatch<'_> {
    fn add_to_batch(&mut self, params: Vec<String>) -> Result<(), DbError> {
        self.buffer.push(params);
        Ok(())
    }

    fn execute_batch(&mut self) -> Result<usize, DbError> {
        let number = self.backend.batches.len() + 1;
        if self.backend.fail_on_batch == Some(number) {
            return Err(DbError::Write(format!("constraint failed in batch {number}")));
        }
        self.backend.batches.push(self.buffer.rows().to_vec());
        Ok(self.buffer.len())
    }

    fn clear_batch(&mut self) {
        self.buffer.clear();
    }

    fn pending(&self) -> usize {
        self.buffer.len()
    }

    fn close(mut self) -> Result<(), DbError> {
        self.closed = true;
        self.backend.closed += 1;
        Ok(())
    }
}

impl Drop for RecordingBatch<'_> {
    fn drop(&mut self) {
        if !self.closed {
            self.backend.released_on_drop += 1;
        }
    }
}
