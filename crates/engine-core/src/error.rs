use crate::metrics::IngestionCounters;
use connectors::{file::delimited::error::FileError, sql::base::error::DbError};
use model::schema::error::SchemaError;
use thiserror::Error;

/// Errors raised while validating ingestion settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Flush threshold must be at least 1")]
    ZeroFlushThreshold,

    #[error("Progress interval must be at least 1")]
    ZeroProgressInterval,

    /// Delimiter, comment marker or look-ahead bound is unusable.
    #[error("Invalid source settings: {0}")]
    InvalidSource(String),
}

/// Everything that can stop a load.
///
/// Malformed lines and an already existing table are not errors; they only
/// show up in the counters and the report.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The source could not be opened or read, or it has no header line.
    #[error("Source error: {0}")]
    Source(#[from] FileError),

    /// The table name or the column names are unusable.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// CREATE TABLE failed for a reason other than the table already existing.
    #[error("Failed to create table '{table}': {source}")]
    CreateTable {
        table: String,
        #[source]
        source: DbError,
    },

    #[error("Failed to prepare insert into '{table}': {source}")]
    Prepare {
        table: String,
        #[source]
        source: DbError,
    },

    /// A batch was rejected. Rows committed by earlier batches stay committed.
    #[error("Batch {batch} failed after {} rows were inserted: {source}", .counters.rows_inserted)]
    BatchExecution {
        batch: u64,
        counters: IngestionCounters,
        #[source]
        source: DbError,
    },

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

impl IngestionError {
    /// Counters at the moment of failure, when the load got as far as inserting.
    pub fn counters(&self) -> Option<&IngestionCounters> {
        match self {
            IngestionError::BatchExecution { counters, .. } => Some(counters),
            _ => None,
        }
    }
}
