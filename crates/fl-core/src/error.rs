//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `FlError` as one variant
//! via `From`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::CityId;

/// The top-level error type for `fl-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FlError {
    #[error("city {0} not found")]
    CityNotFound(CityId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fl-*` crates.
pub type FlResult<T> = Result<T, FlError>;
