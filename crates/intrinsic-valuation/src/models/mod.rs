//! Per-share valuation models.
//!
//! Each model is a pure function over optional inputs:
//! - [`graham_number`]: Benjamin Graham's fair value ceiling
//! - [`discounted_cash_flow`]: finite-horizon earnings DCF
//! - [`dividend_discount`]: Gordon growth dividend model
//!
//! Growth and discount rates are fractions (`0.10` means 10%).

mod dcf;
mod ddm;
mod graham;

pub use dcf::{DEFAULT_YEARS, discounted_cash_flow};
pub use ddm::dividend_discount;
pub use graham::{GRAHAM_MULTIPLIER, graham_number};
