//! The screening pipeline.
//!
//! For each ticker in universe order (up to the configured cap): fetch its
//! fundamentals, apply the quality filter, value the survivors with the
//! Graham and DCF models, then assemble the result table.
//!
//! A failed fetch never aborts the run. The ticker is treated as a record
//! with every field absent, which fails the filter.

use std::collections::HashMap;

use intrinsic_traits::{
    FundamentalRecord, FundamentalsSource, Result, SectorEntry, Symbol, UniverseSource,
};
use intrinsic_valuation::{discounted_cash_flow, graham_number};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ScreenConfig;
use crate::table::{ResultTable, ScreeningRow, UNKNOWN_SECTOR};

/// Counters of a screening run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Tickers in the universe.
    pub requested: usize,
    /// Tickers actually screened after the cap.
    pub screened: usize,
    /// Tickers that passed the filter.
    pub passed: usize,
    /// Tickers whose fetch failed.
    pub fetch_failures: usize,
}

/// Map each symbol to its sector label.
#[must_use]
pub fn sector_lookup(entries: &[SectorEntry]) -> HashMap<Symbol, String> {
    entries
        .iter()
        .map(|entry| (entry.symbol.clone(), entry.sector.clone()))
        .collect()
}

/// Runs the screen against a fundamentals source.
#[derive(Debug, Clone)]
pub struct Screener<S> {
    source: S,
    config: ScreenConfig,
}

impl<S: FundamentalsSource> Screener<S> {
    /// Create a screener with the given configuration.
    pub const fn new(source: S, config: ScreenConfig) -> Self {
        Self { source, config }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// The wrapped source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Screen `tickers` in order, labelling each with its sector from `sectors`.
    pub async fn run(
        &self,
        tickers: &[Symbol],
        sectors: &HashMap<Symbol, String>,
    ) -> (ResultTable, ScreenReport) {
        let limit = self.config.max_tickers.min(tickers.len());
        let mut report = ScreenReport {
            requested: tickers.len(),
            screened: limit,
            ..ScreenReport::default()
        };
        info!(
            source = self.source.name(),
            requested = report.requested,
            screened = report.screened,
            "starting screen"
        );

        let mut passing = Vec::new();
        for ticker in &tickers[..limit] {
            let record = match self.source.fetch(ticker).await {
                Ok(record) => record,
                Err(e) => {
                    warn!(%ticker, error = %e, "fetch failed, treating as missing data");
                    report.fetch_failures += 1;
                    FundamentalRecord::empty(ticker.clone())
                }
            };

            let failed = self.config.criteria.failed_clauses(&record);
            if !failed.is_empty() {
                let clauses: Vec<String> = failed.iter().map(ToString::to_string).collect();
                debug!(%ticker, failed = ?clauses, "filtered out");
                continue;
            }

            passing.push(self.score(ticker, record, sectors));
        }

        report.passed = passing.len();
        info!(
            passed = report.passed,
            fetch_failures = report.fetch_failures,
            "screen finished"
        );
        (ResultTable::build(passing), report)
    }

    /// Screen the constituents of `universe`, in the order it lists them.
    ///
    /// # Errors
    ///
    /// Returns an error if the universe cannot be loaded. Per-ticker fetch
    /// failures are counted in the report instead.
    pub async fn run_universe<U: UniverseSource + ?Sized>(
        &self,
        universe: &U,
    ) -> Result<(ResultTable, ScreenReport)> {
        let entries = universe.constituents().await?;
        let tickers: Vec<Symbol> = entries.iter().map(|e| e.symbol.clone()).collect();
        let sectors = sector_lookup(&entries);
        Ok(self.run(&tickers, &sectors).await)
    }

    fn score(
        &self,
        ticker: &str,
        record: FundamentalRecord,
        sectors: &HashMap<Symbol, String>,
    ) -> ScreeningRow {
        let params = &self.config.params;
        let graham = graham_number(record.eps, record.book_value_per_share);
        let dcf = discounted_cash_flow(
            record.eps,
            Some(params.growth_rate),
            Some(params.discount_rate),
            params.years,
        );
        let sector = sectors
            .get(ticker)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());
        debug!(%ticker, %sector, ?graham, ?dcf, "passed");

        ScreeningRow {
            sector,
            record,
            graham,
            dcf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableRow;
    use approx::assert_relative_eq;
    use async_trait::async_trait;
    use intrinsic_traits::IntrinsicError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MemorySource {
        records: HashMap<Symbol, FundamentalRecord>,
        calls: AtomicUsize,
    }

    impl MemorySource {
        fn new(records: Vec<FundamentalRecord>) -> Self {
            Self {
                records: records.into_iter().map(|r| (r.ticker.clone(), r)).collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FundamentalsSource for MemorySource {
        fn name(&self) -> &str {
            "memory"
        }

        async fn fetch(&self, symbol: &str) -> Result<FundamentalRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.records
                .get(symbol)
                .cloned()
                .ok_or_else(|| IntrinsicError::SymbolNotFound(symbol.to_string()))
        }
    }

    fn qualifying(ticker: &str, eps: f64, bvps: f64) -> FundamentalRecord {
        FundamentalRecord {
            price: Some(40.0),
            eps: Some(eps),
            book_value_per_share: Some(bvps),
            market_cap: Some(1.0e9),
            return_on_assets: Some(16.0),
            price_to_earnings: Some(15.0),
            quick_ratio: Some(1.2),
            debt_ratio: Some(0.5),
            revenue_growth_percent: Some(12.0),
            ..FundamentalRecord::empty(ticker)
        }
    }

    fn symbols(tickers: &[&str]) -> Vec<Symbol> {
        tickers.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_filters_and_values() {
        let source = MemorySource::new(vec![
            qualifying("GOOD", 5.0, 20.0),
            FundamentalRecord {
                price_to_earnings: Some(25.0),
                ..qualifying("PRICEY", 5.0, 20.0)
            },
        ]);
        let sectors = HashMap::from([("GOOD".to_string(), "Energy".to_string())]);
        let screener = Screener::new(source, ScreenConfig::default());

        let (table, report) = screener.run(&symbols(&["GOOD", "PRICEY"]), &sectors).await;

        assert_eq!(report.screened, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.fetch_failures, 0);

        let rows: Vec<_> = table.companies().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sector, "Energy");
        assert_relative_eq!(rows[0].graham.unwrap(), 47.43);
        assert_relative_eq!(rows[0].dcf.unwrap(), 26.42);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_not_fatal() {
        let source = MemorySource::new(vec![qualifying("GOOD", 2.0, 18.0)]);
        let screener = Screener::new(source, ScreenConfig::default());

        let (table, report) = screener
            .run(&symbols(&["MISSING", "GOOD"]), &HashMap::new())
            .await;

        assert_eq!(report.fetch_failures, 1);
        assert_eq!(report.passed, 1);
        let row = table.companies().next().unwrap();
        assert_eq!(row.ticker(), "GOOD");
        assert_eq!(row.sector, UNKNOWN_SECTOR);
    }

    #[tokio::test]
    async fn test_ticker_cap() {
        let source = MemorySource::new(vec![
            qualifying("A", 2.0, 18.0),
            qualifying("B", 2.0, 18.0),
            qualifying("C", 2.0, 18.0),
        ]);
        let config = ScreenConfig::default().with_max_tickers(2);
        let screener = Screener::new(source, config);

        let (table, report) = screener.run(&symbols(&["A", "B", "C"]), &HashMap::new()).await;

        assert_eq!(report.requested, 3);
        assert_eq!(report.screened, 2);
        assert_eq!(screener.source().calls.load(Ordering::SeqCst), 2);
        let tickers: Vec<&str> = table.companies().map(|r| r.ticker().as_str()).collect();
        assert_eq!(tickers, ["A", "B"]);
    }

    #[tokio::test]
    async fn test_nothing_passes() {
        let screener = Screener::new(MemorySource::new(Vec::new()), ScreenConfig::default());
        let (table, report) = screener.run(&symbols(&["X", "Y"]), &HashMap::new()).await;

        assert_eq!(report.passed, 0);
        assert_eq!(report.fetch_failures, 2);
        assert_eq!(table.rows(), [TableRow::Template]);
    }

    #[tokio::test]
    async fn test_sector_averages_follow_passing_rows() {
        let source = MemorySource::new(vec![
            qualifying("XOM", 2.0, 18.0),
            qualifying("CVX", 5.0, 20.0),
            qualifying("AAPL", 2.0, 18.0),
        ]);
        let entries = vec![
            SectorEntry::new("XOM", "Exxon Mobil", "Energy"),
            SectorEntry::new("CVX", "Chevron", "Energy"),
            SectorEntry::new("AAPL", "Apple Inc.", "Information Technology"),
        ];
        let tickers: Vec<Symbol> = entries.iter().map(|e| e.symbol.clone()).collect();
        let screener = Screener::new(source, ScreenConfig::default());

        let (table, _) = screener.run(&tickers, &sector_lookup(&entries)).await;

        let averages: Vec<_> = table.sector_averages().collect();
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].sector, "Energy");
        assert_eq!(averages[0].members, 2);
        assert_relative_eq!(
            averages[0].value("Graham Valuation (USD)").unwrap(),
            (28.46 + 47.43) / 2.0
        );
        assert_eq!(averages[1].sector, "Information Technology");
    }
}
