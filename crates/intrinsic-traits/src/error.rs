//! Error types for the intrinsic toolkit.
//!
//! Valuation formulas never return errors: an undefined result is an absent
//! value. The variants below cover the outer layers only (data fetching,
//! caching and exporting the result table).

use thiserror::Error;

/// The main error type for intrinsic operations.
#[derive(Debug, Error)]
pub enum IntrinsicError {
    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a symbol is not found in the universe or at the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Error reading or writing the fundamentals cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error exporting the result table.
    #[error("Export error: {0}")]
    Export(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for IntrinsicError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for IntrinsicError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for intrinsic operations.
pub type Result<T> = std::result::Result<T, IntrinsicError>;
