//! Graham number.

use crate::round2;

/// Graham's product of the maximum P/E (15) and maximum P/B (1.5).
pub const GRAHAM_MULTIPLIER: f64 = 22.5;

/// Graham number: `round(sqrt(22.5 × eps × bvps), 2)`.
///
/// Returns `None` when either input is missing, when `eps × bvps` is
/// negative (no real square root), or when the result overflows. Two negative inputs have a positive
/// product and do produce a value.
///
/// # Example
///
/// ```
/// use intrinsic_valuation::graham_number;
///
/// assert_eq!(graham_number(Some(5.0), Some(20.0)), Some(47.43));
/// assert_eq!(graham_number(Some(-1.0), Some(20.0)), None);
/// ```
#[must_use]
pub fn graham_number(eps: Option<f64>, bvps: Option<f64>) -> Option<f64> {
    let product = eps? * bvps?;
    if !product.is_finite() || product < 0.0 {
        return None;
    }
    round2((GRAHAM_MULTIPLIER * product).sqrt())
}
