//! Finite-horizon discounted cash flow.

use crate::round2;

/// Projection horizon used when the caller has no preference.
pub const DEFAULT_YEARS: u32 = 5;

/// Discounted cash flow over `years` projected years.
///
/// Year `i` (1-indexed) projects `eps × (1 + growth)^i` and discounts it by
/// `(1 + discount)^i`. The result is the sum rounded to two decimals.
///
/// There is no terminal value, so `discount <= growth` is a legitimate
/// input here. A horizon of zero years sums nothing and returns `Some(0.0)`.
/// Returns `None` when an input is missing, when `1 + discount` is zero, or
/// when the rounded sum is not finite.
///
/// # Example
///
/// ```
/// use intrinsic_valuation::discounted_cash_flow;
///
/// assert_eq!(discounted_cash_flow(Some(2.0), Some(0.10), Some(0.08), 5), Some(10.57));
/// ```
#[must_use]
pub fn discounted_cash_flow(
    eps: Option<f64>,
    growth: Option<f64>,
    discount: Option<f64>,
    years: u32,
) -> Option<f64> {
    let eps = eps?;
    let growth_factor = 1.0 + growth?;
    let discount_factor = 1.0 + discount?;
    if discount_factor == 0.0 {
        return None;
    }

    let mut total = 0.0;
    for year in 1..=years {
        let exponent = i32::try_from(year).ok()?;
        let cash_flow = eps * growth_factor.powi(exponent);
        total += cash_flow / discount_factor.powi(exponent);
    }

    round2(total)
}
