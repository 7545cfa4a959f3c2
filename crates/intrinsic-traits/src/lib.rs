#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core type definitions for the intrinsic valuation toolkit.
//!
//! This crate provides the foundational pieces shared by the valuation engine,
//! the screening pipeline and the data providers: the per-ticker
//! [`FundamentalRecord`], the index universe rows, the error type and the
//! traits every data source implements.

/// The version of the intrinsic-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod source;
pub mod types;

// Re-exports
pub use error::{IntrinsicError, Result};
pub use source::{FundamentalsSource, UniverseSource};
pub use types::{
    Date, FundamentalRecord, NOT_AVAILABLE, SectorEntry, Symbol, revenue_growth_percent,
};
