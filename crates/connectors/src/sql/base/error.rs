use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The target table of a CREATE TABLE is already present.
    #[error("Table already exists: {0}")]
    AlreadyExists(String),

    /// A bound row does not fit the prepared statement.
    #[error("Parameter count mismatch: statement expects {expected}, got {actual}")]
    ParamCount { expected: usize, actual: usize },

    /// Writing rows to the database failed at the application level.
    #[error("Write error: {0}")]
    Write(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DbError {
    /// True for a CREATE TABLE that hit an existing table, whichever layer reported it.
    pub fn is_already_exists(&self) -> bool {
        match self {
            DbError::AlreadyExists(_) => true,
            DbError::Sql(err) => is_already_exists(err),
            _ => false,
        }
    }
}

/// SQLite reports a duplicate CREATE TABLE as a generic `SQLITE_ERROR`, either while
/// stepping (`SqliteFailure`) or while preparing (`SqlInputError`).
pub(crate) fn is_already_exists(err: &rusqlite::Error) -> bool {
    let (code, msg) = match err {
        rusqlite::Error::SqliteFailure(code, Some(msg)) => (code, msg),
        rusqlite::Error::SqlInputError { error, msg, .. } => (error, msg),
        _ => return false,
    };
    code.extended_code == rusqlite::ffi::SQLITE_ERROR && msg.contains("already exists")
}

/// Errors happening during adapter or connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Failed to open database {location}: {source}")]
    Open {
        location: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to apply PRAGMA {pragma}={value}: {source}")]
    Pragma {
        pragma: &'static str,
        value: String,
        #[source]
        source: rusqlite::Error,
    },
}
