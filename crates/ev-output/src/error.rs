//! Result-writer errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// A result file could not be created in the output directory.
    #[error("cannot create result file {}: {source}", path.display())]
    Create {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("result write failed: {0}")]
    Io(#[from] io::Error),

    #[error("CSV row rejected: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite result store: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "parquet")]
    #[error("Arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("Parquet result file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl OutputError {
    pub(crate) fn create(path: PathBuf) -> impl FnOnce(io::Error) -> Self {
        move |source| OutputError::Create { path, source }
    }
}

pub type OutputResult<T> = Result<T, OutputError>;
