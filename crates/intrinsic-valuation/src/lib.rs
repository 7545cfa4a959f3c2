//! Intrinsic value models.
//!
//! This crate provides three classic per-share valuation formulas and the
//! composite built on top of them:
//! - Graham number: `sqrt(22.5 × EPS × BVPS)`
//! - Discounted cash flow: EPS grown and discounted over a finite horizon
//! - Dividend discount model: a perpetually growing dividend stream
//!
//! Every model fails soft. An input that is missing, or that falls outside the
//! formula's domain, produces `None` instead of an error. Domain checks are
//! done up front, before any arithmetic.
//!
//! # Example
//!
//! ```
//! use intrinsic_valuation::{ValuationParams, graham_number, value};
//! use intrinsic_traits::FundamentalRecord;
//!
//! assert_eq!(graham_number(Some(2.0), Some(18.0)), Some(28.46));
//!
//! let record = FundamentalRecord {
//!     eps: Some(2.0),
//!     book_value_per_share: Some(18.0),
//!     ..FundamentalRecord::empty("ACME")
//! };
//! let result = value(&record, &ValuationParams::default());
//! assert!(result.average().is_some());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod composite;
pub mod models;
pub mod registry;

// Re-export key types
pub use composite::{ValuationParams, ValuationResult, Verdict, value};
pub use models::{discounted_cash_flow, dividend_discount, graham_number};
pub use registry::{ModelInfo, available_models, get_model_info};

/// Round to two decimals, the precision every model reports at.
///
/// Halves round to even, so `0.125` becomes `0.12`. Returns `None` when the
/// rounded value is not finite.
pub(crate) fn round2(value: f64) -> Option<f64> {
    Some((value * 100.0).round_ties_even() / 100.0).filter(|v| v.is_finite())
}
