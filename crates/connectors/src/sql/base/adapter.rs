use crate::sql::base::{batch::BatchStatement, error::DbError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Other(String),
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::Sqlite => f.write_str("sqlite"),
            DatabaseKind::Other(name) => f.write_str(name),
        }
    }
}

/// The relational store a load writes into.
///
/// Connection tuning (journaling, sync mode, lock waits) belongs to the
/// implementation's own settings; callers only issue SQL text.
pub trait StorageBackend {
    type Batch<'a>: BatchStatement
    where
        Self: 'a;

    /// Runs a single statement and returns the affected row count.
    fn execute(&mut self, sql: &str) -> Result<usize, DbError>;

    /// Prepares `sql` for batched execution. The returned handle borrows the
    /// backend exclusively until it is closed or dropped.
    fn prepare_batch(&mut self, sql: &str) -> Result<Self::Batch<'_>, DbError>;

    fn kind(&self) -> DatabaseKind;
}
