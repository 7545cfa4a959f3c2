//! Quality filter applied to every screened company.

use std::fmt;

use intrinsic_traits::FundamentalRecord;
use serde::{Deserialize, Serialize};

/// Thresholds of the screening filter.
///
/// A record passes only if every clause holds. A clause whose field is absent
/// fails; there is no partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningCriteria {
    /// Return on assets must exceed this, in percent (default: 15)
    pub min_return_on_assets: f64,

    /// Lowest accepted P/E, inclusive (default: 10)
    pub min_price_to_earnings: f64,

    /// Highest accepted P/E, inclusive (default: 20)
    pub max_price_to_earnings: f64,

    /// Quick ratio must exceed this (default: 1)
    pub min_quick_ratio: f64,

    /// Debt ratio must stay below this (default: 1)
    pub max_debt_ratio: f64,

    /// Revenue growth must exceed this, in percent (default: 10)
    pub min_revenue_growth: f64,
}

impl Default for ScreeningCriteria {
    fn default() -> Self {
        Self {
            min_return_on_assets: 15.0,
            min_price_to_earnings: 10.0,
            max_price_to_earnings: 20.0,
            min_quick_ratio: 1.0,
            max_debt_ratio: 1.0,
            min_revenue_growth: 10.0,
        }
    }
}

/// One clause of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    /// ROA above the minimum.
    ReturnOnAssets,
    /// P/E inside the inclusive band.
    PriceToEarnings,
    /// Quick ratio above the minimum.
    QuickRatio,
    /// Debt ratio below the maximum.
    DebtRatio,
    /// Revenue growth above the minimum.
    RevenueGrowth,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ReturnOnAssets => "ROA",
            Self::PriceToEarnings => "PER",
            Self::QuickRatio => "quick ratio",
            Self::DebtRatio => "debt ratio",
            Self::RevenueGrowth => "revenue growth",
        };
        f.write_str(label)
    }
}

impl ScreeningCriteria {
    /// Whether `record` passes every clause.
    #[must_use]
    pub fn passes(&self, record: &FundamentalRecord) -> bool {
        self.failed_clauses(record).is_empty()
    }

    /// The clauses `record` fails, in filter order.
    #[must_use]
    pub fn failed_clauses(&self, record: &FundamentalRecord) -> Vec<Clause> {
        let checks = [
            (
                Clause::ReturnOnAssets,
                record
                    .return_on_assets
                    .is_some_and(|roa| roa > self.min_return_on_assets),
            ),
            (
                Clause::PriceToEarnings,
                record.price_to_earnings.is_some_and(|pe| {
                    (self.min_price_to_earnings..=self.max_price_to_earnings).contains(&pe)
                }),
            ),
            (
                Clause::QuickRatio,
                record.quick_ratio.is_some_and(|qr| qr > self.min_quick_ratio),
            ),
            (
                Clause::DebtRatio,
                record.debt_ratio.is_some_and(|dr| dr < self.max_debt_ratio),
            ),
            (
                Clause::RevenueGrowth,
                record
                    .revenue_growth_percent
                    .is_some_and(|rg| rg > self.min_revenue_growth),
            ),
        ];

        checks
            .into_iter()
            .filter_map(|(clause, ok)| (!ok).then_some(clause))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualifying() -> FundamentalRecord {
        FundamentalRecord {
            return_on_assets: Some(16.0),
            price_to_earnings: Some(15.0),
            quick_ratio: Some(1.2),
            debt_ratio: Some(0.5),
            revenue_growth_percent: Some(12.0),
            ..FundamentalRecord::empty("GOOD")
        }
    }

    #[test]
    fn test_qualifying_record_passes() {
        let criteria = ScreeningCriteria::default();
        assert!(criteria.passes(&qualifying()));
        assert!(criteria.failed_clauses(&qualifying()).is_empty());
    }

    #[test]
    fn test_pe_out_of_band_fails() {
        let record = FundamentalRecord {
            price_to_earnings: Some(25.0),
            ..qualifying()
        };
        let criteria = ScreeningCriteria::default();
        assert!(!criteria.passes(&record));
        assert_eq!(criteria.failed_clauses(&record), vec![Clause::PriceToEarnings]);
    }

    #[test]
    fn test_pe_band_is_inclusive() {
        let criteria = ScreeningCriteria::default();
        for pe in [10.0, 20.0] {
            let record = FundamentalRecord {
                price_to_earnings: Some(pe),
                ..qualifying()
            };
            assert!(criteria.passes(&record), "PER {pe} should pass");
        }
    }

    #[test]
    fn test_strict_thresholds() {
        let criteria = ScreeningCriteria::default();
        let at_limits = FundamentalRecord {
            return_on_assets: Some(15.0),
            quick_ratio: Some(1.0),
            debt_ratio: Some(1.0),
            revenue_growth_percent: Some(10.0),
            ..qualifying()
        };
        assert_eq!(
            criteria.failed_clauses(&at_limits),
            vec![
                Clause::ReturnOnAssets,
                Clause::QuickRatio,
                Clause::DebtRatio,
                Clause::RevenueGrowth,
            ]
        );
    }

    #[test]
    fn test_any_missing_field_fails() {
        let criteria = ScreeningCriteria::default();
        let blanks: [fn(&mut FundamentalRecord); 5] = [
            |r: &mut FundamentalRecord| r.return_on_assets = None,
            |r: &mut FundamentalRecord| r.price_to_earnings = None,
            |r: &mut FundamentalRecord| r.quick_ratio = None,
            |r: &mut FundamentalRecord| r.debt_ratio = None,
            |r: &mut FundamentalRecord| r.revenue_growth_percent = None,
        ];
        for blank in blanks {
            let mut record = qualifying();
            blank(&mut record);
            assert!(!criteria.passes(&record));
            assert_eq!(criteria.failed_clauses(&record).len(), 1);
        }
    }

    #[test]
    fn test_zero_debt_passes() {
        let record = FundamentalRecord {
            debt_ratio: Some(0.0),
            ..qualifying()
        };
        assert!(ScreeningCriteria::default().passes(&record));
    }

    #[test]
    fn test_empty_record_fails_everything() {
        let failed = ScreeningCriteria::default().failed_clauses(&FundamentalRecord::empty("X"));
        assert_eq!(failed.len(), 5);
    }

    #[test]
    fn test_custom_thresholds_from_json() {
        let criteria: ScreeningCriteria =
            serde_json::from_str(r#"{"max_price_to_earnings": 30.0}"#).unwrap();
        assert!((criteria.max_price_to_earnings - 30.0).abs() < f64::EPSILON);
        assert!((criteria.min_return_on_assets - 15.0).abs() < f64::EPSILON);

        let record = FundamentalRecord {
            price_to_earnings: Some(25.0),
            ..qualifying()
        };
        assert!(criteria.passes(&record));
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(Clause::PriceToEarnings.to_string(), "PER");
        assert_eq!(Clause::RevenueGrowth.to_string(), "revenue growth");
    }
}
