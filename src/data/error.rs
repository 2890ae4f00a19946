use std::path::PathBuf;

use thiserror::Error;

use super::roles::ColumnRole;

/// Errors surfaced by the data layer. None of them should crash the app:
/// the UI reports `Load` in the status line and `MissingColumn` inline.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file is missing, unreadable, or not a table with a header row.
    #[error("failed to load {}: {cause:#}", path.display())]
    Load { path: PathBuf, cause: anyhow::Error },

    /// No column fills the role a view depends on.
    #[error("no {role} column found")]
    MissingColumn { role: ColumnRole },

    /// A column requested by name is absent.
    #[error("column '{0}' not found")]
    UnknownColumn(String),
}

pub type DataResult<T> = std::result::Result<T, DataError>;
