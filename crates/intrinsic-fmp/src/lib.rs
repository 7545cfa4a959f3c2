//! Financial Modeling Prep (FMP) API client for intrinsic.
//!
//! This crate provides a client for fetching the fundamentals snapshot the
//! valuation models and the screen need from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API, and
//! implements the `intrinsic-traits` source traits on top of it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use intrinsic_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // One fundamentals record, sub-requests issued concurrently
//!     let record = client.fundamental_record("AAPL").await?;
//!
//!     // S&P 500 constituents with their GICS sectors
//!     let universe = client.sp500_constituents().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod record;
mod source;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use record::to_record;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
