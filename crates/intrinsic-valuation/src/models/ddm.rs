//! Dividend discount model (Gordon growth).

use crate::round2;

/// Dividend discount model: `round(dividend × (1 + growth) / (discount - growth), 2)`.
///
/// Returns `None` when an input is missing, when `discount == growth`
/// (zero denominator), or when the result is not finite. A discount rate below the growth rate is not
/// rejected and yields a negative value; callers that care must check the
/// spread themselves.
///
/// # Example
///
/// ```
/// use intrinsic_valuation::dividend_discount;
///
/// assert_eq!(dividend_discount(Some(1.0), Some(0.05), Some(0.08)), Some(35.0));
/// assert_eq!(dividend_discount(Some(1.0), Some(0.05), Some(0.05)), None);
/// ```
#[must_use]
pub fn dividend_discount(
    dividend: Option<f64>,
    growth: Option<f64>,
    discount: Option<f64>,
) -> Option<f64> {
    let dividend = dividend?;
    let growth = growth?;
    let spread = discount? - growth;
    if spread == 0.0 {
        return None;
    }
    let value = dividend * (1.0 + growth) / spread;
    round2(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ddm_known_value() {
        assert_relative_eq!(dividend_discount(Some(1.0), Some(0.05), Some(0.08)).unwrap(), 35.0);
        assert_relative_eq!(dividend_discount(Some(2.0), Some(0.06), Some(0.08)).unwrap(), 106.0);
    }

    #[test]
    fn test_ddm_equal_rates_is_undefined() {
        assert_eq!(dividend_discount(Some(1.0), Some(0.05), Some(0.05)), None);
    }

    #[test]
    fn test_ddm_discount_below_growth_is_negative() {
        let value = dividend_discount(Some(1.0), Some(0.10), Some(0.08)).unwrap();
        assert_relative_eq!(value, -55.0);
    }

    #[test]
    fn test_ddm_zero_dividend() {
        assert_relative_eq!(dividend_discount(Some(0.0), Some(0.06), Some(0.08)).unwrap(), 0.0);
    }

    #[test]
    fn test_ddm_half_cent_rounds_to_even() {
        assert_eq!(dividend_discount(Some(1.0), Some(0.0), Some(8.0)), Some(0.12));
    }

    #[test]
    fn test_ddm_overflow() {
        assert_eq!(dividend_discount(Some(1e307), Some(0.0), Some(1.0)), None);
    }

    #[test]
    fn test_ddm_missing_inputs() {
        assert_eq!(dividend_discount(None, Some(0.05), Some(0.08)), None);
        assert_eq!(dividend_discount(Some(1.0), None, Some(0.08)), None);
        assert_eq!(dividend_discount(Some(1.0), Some(0.05), None), None);
    }
}
