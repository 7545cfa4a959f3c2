//! Common types used throughout the intrinsic toolkit.
//!
//! This module defines the per-ticker fundamentals snapshot consumed by the
//! valuation engine and the screening pipeline, plus the rows of the index
//! universe.

use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically a ticker like "AAPL".
pub type Symbol = String;

/// Placeholder recorded when the provider has no analyst recommendation.
pub const NOT_AVAILABLE: &str = "N/A";

fn default_recommendation() -> String {
    NOT_AVAILABLE.to_string()
}

/// Per-ticker fundamentals snapshot.
///
/// Built from a single fetch against a data provider. Any field the provider
/// did not return (or returned malformed) is `None`; nothing here is ever
/// substituted with zero except `dividend_rate`, whose absence means "pays no
/// dividend".
///
/// `return_on_assets` and `revenue_growth_percent` are in percent
/// (`16.0` means 16%), everything else is in the provider's native units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalRecord {
    /// Ticker symbol.
    pub ticker: Symbol,
    /// Current share price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Trailing earnings per share.
    #[serde(default)]
    pub eps: Option<f64>,
    /// Book value per share.
    #[serde(default)]
    pub book_value_per_share: Option<f64>,
    /// Annual dividend per share (0 when the company pays none).
    #[serde(default)]
    pub dividend_rate: f64,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Return on assets, in percent.
    #[serde(default)]
    pub return_on_assets: Option<f64>,
    /// Trailing price-to-earnings ratio.
    #[serde(default)]
    pub price_to_earnings: Option<f64>,
    /// Quick ratio.
    #[serde(default)]
    pub quick_ratio: Option<f64>,
    /// Debt ratio as reported by the provider.
    #[serde(default)]
    pub debt_ratio: Option<f64>,
    /// Revenue growth, in percent. See [`revenue_growth_percent`].
    #[serde(default)]
    pub revenue_growth_percent: Option<f64>,
    /// Consensus analyst recommendation, `"N/A"` if absent.
    #[serde(default = "default_recommendation")]
    pub analyst_recommendation: String,
}

impl FundamentalRecord {
    /// Create a record with every optional field absent.
    ///
    /// This is also what a failed fetch degrades to.
    #[must_use]
    pub fn empty(ticker: impl Into<Symbol>) -> Self {
        Self {
            ticker: ticker.into(),
            price: None,
            eps: None,
            book_value_per_share: None,
            dividend_rate: 0.0,
            market_cap: None,
            return_on_assets: None,
            price_to_earnings: None,
            quick_ratio: None,
            debt_ratio: None,
            revenue_growth_percent: None,
            analyst_recommendation: default_recommendation(),
        }
    }

    /// Number of optional numeric fields that carry a value.
    ///
    /// Handy for logging how complete a fetch was.
    #[must_use]
    pub fn populated_fields(&self) -> usize {
        [
            self.price,
            self.eps,
            self.book_value_per_share,
            self.market_cap,
            self.return_on_assets,
            self.price_to_earnings,
            self.quick_ratio,
            self.debt_ratio,
            self.revenue_growth_percent,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Revenue growth in percent, as the screening dashboard has always defined it.
///
/// `(total_revenue - revenue_per_share) / revenue_per_share * 100`.
///
/// Returns `None` when either input is missing, when `revenue_per_share` is
/// zero, or when the result is not finite.
#[must_use]
pub fn revenue_growth_percent(
    total_revenue: Option<f64>,
    revenue_per_share: Option<f64>,
) -> Option<f64> {
    let total = total_revenue?;
    let per_share = revenue_per_share?;
    if per_share == 0.0 {
        return None;
    }
    let growth = (total - per_share) / per_share * 100.0;
    growth.is_finite().then_some(growth)
}

/// One row of the reference index universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorEntry {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Company name.
    pub name: String,
    /// GICS sector label.
    pub sector: String,
}

impl SectorEntry {
    /// Create a new universe row.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        name: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: sector.into(),
        }
    }
}
