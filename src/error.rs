//! Import error types

use std::path::PathBuf;

use thiserror::Error;

use crate::db::DbError;

/// Errors that abort an import run
///
/// Every variant is fatal: the run stops and only the per-food blocks
/// already flushed to the output remain.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Dataset {path} must have exactly one top-level key, found {keys}")]
    DatasetShape { path: PathBuf, keys: usize },

    #[error("No dataset files found in {0}")]
    NoDatasets(PathBuf),

    #[error("Food '{food}': nutrient '{nutrient}' has no amount")]
    MissingAmount { food: String, nutrient: String },

    #[error("Food '{food}': nutrient '{nutrient}' amount {value} is not a finite number")]
    InvalidAmount {
        food: String,
        nutrient: String,
        value: String,
    },

    #[error("Food '{food}': total for '{nutrient}' is not finite")]
    NonFiniteTotal { food: String, nutrient: String },

    #[error("Ran out of {0} identifiers")]
    IdOverflow(&'static str),

    #[error("Identifier {0} cannot be resolved without a live store")]
    UnresolvedId(String),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::Db(DbError::Sqlite(err))
    }
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
