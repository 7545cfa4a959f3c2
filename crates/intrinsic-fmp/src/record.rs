//! Mapping of FMP payloads into [`FundamentalRecord`].

use intrinsic_traits::{FundamentalRecord, NOT_AVAILABLE, revenue_growth_percent};

use crate::types::FundamentalData;

/// ROA in percent. FMP reports a fraction; zero counts as missing.
fn roa_percent(fraction: Option<f64>) -> Option<f64> {
    fraction.filter(|v| *v != 0.0).map(|v| v * 100.0)
}

/// Assemble a record from whatever sub-requests succeeded.
///
/// Key metrics take precedence over ratios for the fields both report.
#[must_use]
pub fn to_record(data: &FundamentalData) -> FundamentalRecord {
    let quote = data.quote.as_ref();
    let metrics = data.key_metrics.as_ref();
    let ratios = data.ratios.as_ref();
    let income = data.income.as_ref();

    let book_value_per_share = metrics
        .and_then(|m| m.book_value_per_share)
        .or_else(|| ratios.and_then(|r| r.book_value_per_share));
    let revenue_per_share = metrics
        .and_then(|m| m.revenue_per_share)
        .or_else(|| ratios.and_then(|r| r.revenue_per_share));
    let return_on_assets = metrics
        .and_then(|m| m.return_on_assets)
        .or_else(|| ratios.and_then(|r| r.return_on_assets));

    FundamentalRecord {
        ticker: data.symbol.clone(),
        price: quote.and_then(|q| q.price),
        eps: income
            .and_then(|i| i.eps)
            .or_else(|| quote.and_then(|q| q.eps)),
        book_value_per_share,
        dividend_rate: data
            .profile
            .as_ref()
            .and_then(|p| p.last_dividend)
            .unwrap_or(0.0),
        market_cap: quote.and_then(|q| q.market_cap),
        return_on_assets: roa_percent(return_on_assets),
        price_to_earnings: ratios.and_then(|r| r.price_to_earnings),
        quick_ratio: ratios.and_then(|r| r.quick_ratio),
        debt_ratio: ratios.and_then(|r| r.debt_to_equity),
        revenue_growth_percent: revenue_growth_percent(
            income.and_then(|i| i.revenue),
            revenue_per_share,
        ),
        analyst_recommendation: data
            .grades
            .as_ref()
            .and_then(|g| g.recommendation_key())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GradesConsensus, IncomeStatement, KeyMetricsTtm, Profile, Quote, RatiosTtm};
    use approx::assert_relative_eq;

    fn full() -> FundamentalData {
        FundamentalData {
            symbol: "ACME".to_string(),
            quote: Some(Quote {
                symbol: "ACME".to_string(),
                name: Some("Acme Corp".to_string()),
                price: Some(40.0),
                market_cap: Some(1.0e9),
                eps: Some(1.5),
            }),
            profile: Some(Profile {
                symbol: "ACME".to_string(),
                company_name: None,
                sector: Some("Industrials".to_string()),
                last_dividend: Some(1.2),
            }),
            key_metrics: Some(KeyMetricsTtm {
                return_on_assets: Some(0.16),
                book_value_per_share: Some(18.0),
                revenue_per_share: Some(50.0),
            }),
            ratios: Some(RatiosTtm {
                price_to_earnings: Some(15.0),
                quick_ratio: Some(1.2),
                debt_to_equity: Some(0.5),
                ..RatiosTtm::default()
            }),
            income: Some(IncomeStatement {
                date: "2024-12-31".to_string(),
                symbol: "ACME".to_string(),
                revenue: Some(60.0),
                net_income: None,
                eps: Some(2.0),
            }),
            grades: Some(GradesConsensus {
                symbol: "ACME".to_string(),
                strong_buy: 0,
                buy: 3,
                hold: 1,
                sell: 0,
                strong_sell: 0,
                consensus: Some("Buy".to_string()),
            }),
        }
    }

    #[test]
    fn test_full_mapping() {
        let record = to_record(&full());
        assert_eq!(record.ticker, "ACME");
        assert_relative_eq!(record.price.unwrap(), 40.0);
        assert_relative_eq!(record.eps.unwrap(), 2.0);
        assert_relative_eq!(record.book_value_per_share.unwrap(), 18.0);
        assert_relative_eq!(record.dividend_rate, 1.2);
        assert_relative_eq!(record.return_on_assets.unwrap(), 16.0);
        assert_relative_eq!(record.debt_ratio.unwrap(), 0.5);
        assert_relative_eq!(record.revenue_growth_percent.unwrap(), 20.0);
        assert_eq!(record.analyst_recommendation, "buy");
    }

    #[test]
    fn test_eps_falls_back_to_quote() {
        let data = FundamentalData {
            income: None,
            ..full()
        };
        let record = to_record(&data);
        assert_relative_eq!(record.eps.unwrap(), 1.5);
        assert!(record.revenue_growth_percent.is_none());
    }

    #[test]
    fn test_zero_roa_is_missing() {
        let mut data = full();
        if let Some(metrics) = data.key_metrics.as_mut() {
            metrics.return_on_assets = Some(0.0);
        }
        assert!(to_record(&data).return_on_assets.is_none());
    }

    #[test]
    fn test_ratios_fill_missing_metrics() {
        let data = FundamentalData {
            key_metrics: None,
            ratios: Some(RatiosTtm {
                return_on_assets: Some(0.2),
                book_value_per_share: Some(10.0),
                ..RatiosTtm::default()
            }),
            ..full()
        };
        let record = to_record(&data);
        assert_relative_eq!(record.return_on_assets.unwrap(), 20.0);
        assert_relative_eq!(record.book_value_per_share.unwrap(), 10.0);
    }

    #[test]
    fn test_sparse_data_defaults() {
        let data = FundamentalData {
            symbol: "NEW".to_string(),
            ..FundamentalData::default()
        };
        let record = to_record(&data);
        assert_eq!(record, FundamentalRecord::empty("NEW"));
        assert_relative_eq!(record.dividend_rate, 0.0);
        assert_eq!(record.analyst_recommendation, NOT_AVAILABLE);
    }
}
