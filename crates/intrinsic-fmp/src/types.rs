//! Data types for FMP API responses.
//!
//! Only the fields the valuation models and the screen read are declared.
//! Numeric fields are optional: FMP omits or nulls them freely, and a
//! missing number must stay missing rather than turn into zero. Field
//! aliases cover the names used by both the stable and the legacy v3 API.

use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Real-time quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: Option<String>,
    /// Current price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market cap.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// EPS (legacy API only).
    #[serde(default)]
    pub eps: Option<f64>,
}

/// Company profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Sector label.
    #[serde(default)]
    pub sector: Option<String>,
    /// Last annual dividend per share.
    #[serde(default, alias = "lastDiv")]
    pub last_dividend: Option<f64>,
}

/// Trailing-twelve-month key metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetricsTtm {
    /// Return on assets, as a fraction.
    #[serde(default, rename = "returnOnAssetsTTM")]
    pub return_on_assets: Option<f64>,
    /// Book value per share.
    #[serde(default, rename = "bookValuePerShareTTM")]
    pub book_value_per_share: Option<f64>,
    /// Revenue per share.
    #[serde(default, rename = "revenuePerShareTTM")]
    pub revenue_per_share: Option<f64>,
}

/// Trailing-twelve-month financial ratios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatiosTtm {
    /// Price to earnings.
    #[serde(default, rename = "priceToEarningsRatioTTM", alias = "peRatioTTM")]
    pub price_to_earnings: Option<f64>,
    /// Quick ratio.
    #[serde(default, rename = "quickRatioTTM")]
    pub quick_ratio: Option<f64>,
    /// Debt to equity.
    #[serde(
        default,
        rename = "debtToEquityRatioTTM",
        alias = "debtEquityRatioTTM"
    )]
    pub debt_to_equity: Option<f64>,
    /// Return on assets, as a fraction.
    #[serde(default, rename = "returnOnAssetsTTM")]
    pub return_on_assets: Option<f64>,
    /// Book value per share.
    #[serde(default, rename = "bookValuePerShareTTM")]
    pub book_value_per_share: Option<f64>,
    /// Revenue per share.
    #[serde(default, rename = "revenuePerShareTTM")]
    pub revenue_per_share: Option<f64>,
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
    /// Earnings per share (basic).
    #[serde(default)]
    pub eps: Option<f64>,
}

/// Analyst grades consensus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradesConsensus {
    /// Ticker symbol.
    pub symbol: String,
    /// Strong buy count.
    #[serde(default)]
    pub strong_buy: u32,
    /// Buy count.
    #[serde(default)]
    pub buy: u32,
    /// Hold count.
    #[serde(default)]
    pub hold: u32,
    /// Sell count.
    #[serde(default)]
    pub sell: u32,
    /// Strong sell count.
    #[serde(default)]
    pub strong_sell: u32,
    /// Consensus label, e.g. "Strong Buy".
    #[serde(default)]
    pub consensus: Option<String>,
}

impl GradesConsensus {
    /// Consensus as a lowercase key: "Strong Buy" becomes `strong_buy`.
    #[must_use]
    pub fn recommendation_key(&self) -> Option<String> {
        let label = self.consensus.as_deref()?.trim();
        if label.is_empty() {
            return None;
        }
        Some(label.to_lowercase().replace([' ', '-'], "_"))
    }
}

/// One S&P 500 constituent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constituent {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// GICS sector.
    #[serde(default)]
    pub sector: String,
    /// GICS sub-industry.
    #[serde(default)]
    pub sub_sector: Option<String>,
}

/// Every payload that feeds one fundamentals record.
///
/// A sub-request that failed leaves its slot empty.
#[derive(Debug, Clone, Default)]
pub struct FundamentalData {
    /// Ticker symbol, uppercase.
    pub symbol: String,
    /// Quote.
    pub quote: Option<Quote>,
    /// Profile.
    pub profile: Option<Profile>,
    /// TTM key metrics.
    pub key_metrics: Option<KeyMetricsTtm>,
    /// TTM ratios.
    pub ratios: Option<RatiosTtm>,
    /// Latest annual income statement.
    pub income: Option<IncomeStatement>,
    /// Analyst consensus.
    pub grades: Option<GradesConsensus>,
}

impl FundamentalData {
    /// Whether every sub-request came back empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quote.is_none()
            && self.profile.is_none()
            && self.key_metrics.is_none()
            && self.ratios.is_none()
            && self.income.is_none()
            && self.grades.is_none()
    }
}
