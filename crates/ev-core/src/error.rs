//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EvError` as one variant
//! via `#[from]`, so a configuration problem detected here surfaces unchanged
//! at the driver.

use thiserror::Error;

/// The top-level error type for `ev-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ev-core`.
pub type EvResult<T> = Result<T, EvError>;
