use crate::metrics::IngestionCounters;
use model::schema::table::TableSchema;
use serde::Serialize;

/// Outcome of one completed load.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// File path or stream name the rows came from.
    pub source: String,
    pub table: String,
    pub schema: TableSchema,
    pub create_sql: String,
    pub insert_sql: String,
    /// CREATE TABLE hit an existing table and rows were appended to it.
    pub table_existed: bool,
    pub counters: IngestionCounters,
    pub took_ms: u64,
}
