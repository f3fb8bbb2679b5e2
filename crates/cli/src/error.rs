use connectors::sql::base::error::{ConnectorError, DbError};
use engine_core::error::{IngestionError, SettingsError};
use model::schema::error::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to open the database: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Invalid table name: {0}")]
    Schema(#[from] SchemaError),

    #[error("Load failed: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("{failed} of {total} files failed to load")]
    ScanFailed { failed: usize, total: usize },

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Shutdown requested")]
    ShutdownRequested,
}
