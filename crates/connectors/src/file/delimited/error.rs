use std::{io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("No header line found in {0}")]
    MissingHeader(String),
    #[error("Invalid source settings: {0}")]
    InvalidSettings(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Error reading delimited input: {0}")]
    ReadError(#[from] csv::Error),
}

impl FileError {
    /// Maps an open failure to the variant a user can act on.
    pub fn from_open(path: &Path, err: io::Error) -> Self {
        let shown = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound(shown),
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied(shown),
            _ => FileError::IoError(err),
        }
    }
}
