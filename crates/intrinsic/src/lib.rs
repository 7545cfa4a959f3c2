#![doc(issue_tracker_base_url = "https://github.com/factordynamics/intrinsic/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # intrinsic
//!
//! Intrinsic value models and fundamentals screening for equities.
//!
//! intrinsic is an umbrella crate that re-exports all intrinsic sub-crates for
//! convenience: the valuation models, the screening pipeline and the Financial
//! Modeling Prep data provider.
//!
//! ## Quick Start
//!
//! ```ignore
//! use intrinsic::prelude::*;
//! use intrinsic::fmp::FmpClient;
//!
//! # async fn example() -> Result<()> {
//! let client = FmpClient::from_env()?;
//! let record = client.fetch("AAPL").await?;
//!
//! let result = value(&record, &ValuationParams::default());
//! println!("average: {:?}, verdict: {}", result.average(), result.verdict(record.price));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared record types, errors and the data source traits
//! - [`valuation`] - Graham number, DCF and DDM, plus the composite verdict
//! - [`screen`] - Quality filter, screening pipeline, cache and export
//! - [`fmp`] - Financial Modeling Prep client
//!
//! ## Architecture
//!
//! 1. **Sources** produce one [`FundamentalRecord`] per ticker
//! 2. **Models** turn a record into zero to three intrinsic values
//! 3. **The screener** filters a universe and values the survivors
//! 4. **The table** adds per-sector averages and is exported as CSV or JSON

/// Version information for the intrinsic crate.
///
/// This constant contains the current version of intrinsic as specified in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types and traits.
///
/// - [`FundamentalRecord`] - Per-ticker fundamentals snapshot
/// - [`SectorEntry`] - One universe row
/// - [`FundamentalsSource`] / [`UniverseSource`] - Data source seams
pub mod traits {
    pub use intrinsic_traits::*;
}

// Re-export core traits and types at top level for convenience
pub use intrinsic_traits::{
    FundamentalRecord, FundamentalsSource, IntrinsicError, Result, SectorEntry, Symbol,
    UniverseSource,
};

// ============================================================================
// Valuation
// ============================================================================

/// Valuation models.
///
/// ```text
/// Graham = sqrt(22.5 * EPS * BVPS)
/// DCF    = sum_{i=1..n} EPS * (1+g)^i / (1+r)^i
/// DDM    = D * (1+g) / (r - g)
/// ```
///
/// Every model returns `None` instead of failing when its inputs are missing
/// or outside its domain.
pub mod valuation {
    pub use intrinsic_valuation::*;
}

pub use intrinsic_valuation::{ValuationParams, ValuationResult, Verdict, value};

// ============================================================================
// Screening
// ============================================================================

/// Screening pipeline.
///
/// Filter thresholds (all must hold):
///
/// | Field          | Condition       |
/// |----------------|-----------------|
/// | ROA (%)        | > 15            |
/// | PER            | 10 ..= 20       |
/// | Quick ratio    | > 1             |
/// | Debt ratio     | < 1             |
/// | Revenue growth | > 10 %          |
pub mod screen {
    pub use intrinsic_screen::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
pub mod fmp {
    pub use intrinsic_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use intrinsic::prelude::*;
/// ```
pub mod prelude {
    pub use crate::screen::{ScreenConfig, Screener};
    pub use crate::{FundamentalRecord, FundamentalsSource, Result, UniverseSource};
    pub use crate::{IntrinsicError, ValuationParams, ValuationResult, Verdict, value};
}

// ============================================================================
// Tests
// ============================================================================
