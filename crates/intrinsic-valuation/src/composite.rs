//! Composite valuation: all three models, their average and the discount to price.

use std::fmt;

use intrinsic_traits::FundamentalRecord;
use serde::{Deserialize, Serialize};

use crate::models::{DEFAULT_YEARS, discounted_cash_flow, dividend_discount, graham_number};
use crate::round2;

/// Rates and horizon fed to the DCF and DDM models.
///
/// Rates are fractions. The defaults (6% growth, 8% discount, 5 years) are the
/// single-company valuation defaults; the screener uses
/// [`ValuationParams::screening`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationParams {
    /// Annual growth rate (default: 0.06)
    pub growth_rate: f64,

    /// Required rate of return (default: 0.08)
    pub discount_rate: f64,

    /// Projection horizon in years (default: 5)
    pub years: u32,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            growth_rate: 0.06,
            discount_rate: 0.08,
            years: DEFAULT_YEARS,
        }
    }
}

impl ValuationParams {
    /// Fixed parameters of the screening pipeline: 10% growth, 8% discount, 5 years.
    #[must_use]
    pub const fn screening() -> Self {
        Self {
            growth_rate: 0.10,
            discount_rate: 0.08,
            years: DEFAULT_YEARS,
        }
    }

    /// Build parameters from percentages, as a user types them (`6.0` for 6%).
    #[must_use]
    pub fn from_percent(growth_pct: f64, discount_pct: f64, years: u32) -> Self {
        Self {
            growth_rate: growth_pct / 100.0,
            discount_rate: discount_pct / 100.0,
            years,
        }
    }
}

/// Whether a company trades below its estimated intrinsic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Positive discount: price is below the average intrinsic value.
    Undervalued,
    /// Zero or negative discount.
    NotUndervalued,
    /// No intrinsic value (or no price) to compare against.
    Indeterminate,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Undervalued => "undervalued",
            Self::NotUndervalued => "not undervalued",
            Self::Indeterminate => "indeterminate",
        };
        f.write_str(label)
    }
}

/// Output of the three valuation models for one company.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Graham number.
    pub graham: Option<f64>,
    /// Discounted cash flow value.
    pub dcf: Option<f64>,
    /// Dividend discount model value.
    pub ddm: Option<f64>,
}

impl ValuationResult {
    /// Arithmetic mean of the models that produced a value.
    ///
    /// Missing models are excluded rather than counted as zero. Returns
    /// `None` when no model produced a value.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        let defined: Vec<f64> = [self.graham, self.dcf, self.ddm]
            .into_iter()
            .flatten()
            .collect();
        if defined.is_empty() {
            return None;
        }
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    }

    /// Discount of `price` to the average intrinsic value, in percent.
    ///
    /// `(average - price) / average × 100`, rounded to two decimals.
    /// Returns `None` when there is no average, no price, or the average is
    /// zero.
    #[must_use]
    pub fn discount_percent(&self, price: Option<f64>) -> Option<f64> {
        let average = self.average()?;
        let price = price?;
        if average == 0.0 {
            return None;
        }
        let discount = (average - price) / average * 100.0;
        round2(discount)
    }

    /// Classify the discount to `price`.
    #[must_use]
    pub fn verdict(&self, price: Option<f64>) -> Verdict {
        match self.discount_percent(price) {
            Some(discount) if discount > 0.0 => Verdict::Undervalued,
            Some(_) => Verdict::NotUndervalued,
            None => Verdict::Indeterminate,
        }
    }

    /// Whether every model failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.graham.is_none() && self.dcf.is_none() && self.ddm.is_none()
    }
}

/// Run all three models against a fundamentals record.
#[must_use]
pub fn value(record: &FundamentalRecord, params: &ValuationParams) -> ValuationResult {
    let growth = Some(params.growth_rate);
    let discount = Some(params.discount_rate);
    ValuationResult {
        graham: graham_number(record.eps, record.book_value_per_share),
        dcf: discounted_cash_flow(record.eps, growth, discount, params.years),
        ddm: dividend_discount(Some(record.dividend_rate), growth, discount),
    }
}
