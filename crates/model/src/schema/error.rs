use thiserror::Error;

/// Problems with the identifiers derived from a header line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Table name {raw:?} sanitizes to an empty identifier")]
    EmptyTableName { raw: String },

    #[error("Column {ordinal} ({raw:?}) sanitizes to an empty identifier")]
    EmptyColumnName { ordinal: usize, raw: String },

    #[error("Columns {first} ({first_raw:?}) and {second} ({second_raw:?}) both sanitize to '{name}'")]
    DuplicateColumn {
        name: String,
        first: usize,
        first_raw: String,
        second: usize,
        second_raw: String,
    },

    #[error("Header line has no columns")]
    NoColumns,
}
