//! Screen command implementation.

use crate::data;
use anyhow::{Context, Result};
use intrinsic::screen::{
    CachedSource, ExportFormat, FundamentalsCache, ResultTable, ScreenConfig, ScreenReport,
    Screener, TableRow, export, sector_lookup,
};
use intrinsic::{FundamentalsSource, Symbol};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Arguments of `intrinsic screen`.
pub(crate) struct ScreenArgs {
    pub(crate) limit: Option<usize>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) format: Option<String>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) universe_file: Option<PathBuf>,
    /// `None` disables caching.
    pub(crate) cache_file: Option<PathBuf>,
}

/// Load the config file, then apply command-line overrides.
fn load_config(args: &ScreenArgs) -> Result<ScreenConfig> {
    let mut config = match &args.config {
        Some(path) => ScreenConfig::from_json_file(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => ScreenConfig::default(),
    };
    if let Some(limit) = args.limit {
        config = config.with_max_tickers(limit);
    }
    Ok(config)
}

fn export_format(args: &ScreenArgs) -> Result<Option<(PathBuf, ExportFormat)>> {
    let Some(path) = args.output.clone() else {
        return Ok(None);
    };
    let format = match &args.format {
        Some(name) => name.parse::<ExportFormat>()?,
        None => ExportFormat::from_path(&path)?,
    };
    Ok(Some((path, format)))
}

/// Run the screen and print (and optionally export) the result table.
pub(crate) async fn run_screen(args: ScreenArgs) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Fundamentals Screen                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let config = load_config(&args)?;
    let export_to = export_format(&args)?;
    let c = &config.criteria;

    println!(
        "Filter:  ROA > {}%, PER {}-{}, Quick Ratio > {}, Debt < {}, Revenue growth > {}%",
        c.min_return_on_assets,
        c.min_price_to_earnings,
        c.max_price_to_earnings,
        c.min_quick_ratio,
        c.max_debt_ratio,
        c.min_revenue_growth
    );
    println!(
        "DCF:     growth {:.1}%, discount {:.1}%, {} years",
        config.params.growth_rate * 100.0,
        config.params.discount_rate * 100.0,
        config.params.years
    );
    println!("Limit:   {} tickers", config.max_tickers);
    println!();

    let entries = data::load_universe(args.universe_file.as_deref()).await?;
    let tickers: Vec<Symbol> = entries.iter().map(|e| e.symbol.clone()).collect();
    let sectors = sector_lookup(&entries);
    println!(
        "Screening {} of {} constituents...",
        config.max_tickers.min(tickers.len()),
        tickers.len()
    );
    println!();

    let client = data::fmp_client()?;
    match &args.cache_file {
        Some(cache_path) => {
            let cache = FundamentalsCache::load(cache_path, config.cache_ttl())
                .with_context(|| format!("cannot load cache {}", cache_path.display()))?;
            let source = CachedSource::new(client, cache);
            let screener = Screener::new(source, config.clone());
            let (table, report) = screener.run(&tickers, &sectors).await;

            let stats = screener.source().stats();
            info!(hits = stats.hits, misses = stats.misses, "cache usage");

            // Show and export the finished screen before touching the cache file
            let shown = present(&table, &report, export_to);
            save_cache(screener.source(), cache_path);
            shown
        }
        None => {
            let (table, report) = screen_with(client, config.clone(), &tickers, &sectors).await;
            present(&table, &report, export_to)
        }
    }
}

fn present(
    table: &ResultTable,
    report: &ScreenReport,
    export_to: Option<(PathBuf, ExportFormat)>,
) -> Result<()> {
    print_table(table);
    print_report(report);

    if let Some((path, format)) = export_to {
        export(table, &path, format)
            .with_context(|| format!("cannot export to {}", path.display()))?;
        println!("Exported {} rows to {} ({})", table.len(), path.display(), format);
        println!();
    }

    Ok(())
}

/// Persist the cache, logging instead of failing. Returns whether it was saved.
fn save_cache<S>(source: &CachedSource<S>, path: &Path) -> bool {
    match source.save(path) {
        Ok(()) => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot save cache");
            false
        }
    }
}

async fn screen_with<S: FundamentalsSource>(
    source: S,
    config: ScreenConfig,
    tickers: &[Symbol],
    sectors: &HashMap<Symbol, String>,
) -> (ResultTable, ScreenReport) {
    Screener::new(source, config).run(tickers, sectors).await
}

fn print_table(table: &ResultTable) {
    println!("{}", "━".repeat(132));
    println!("RESULTS");
    println!("{}\n", "━".repeat(132));

    println!(
        "{:<22} {:<10} {:>9} {:>7} {:>7} {:>6} {:>6} {:>8} {:<11} {:>9} {:>7} {:>9} {:>9}",
        "Sector",
        "Ticker",
        "Mkt Cap",
        "ROA%",
        "PER",
        "QR",
        "DR",
        "RevG%",
        "Opinion",
        "Price",
        "EPS",
        "Graham",
        "DCF"
    );
    println!("{}", "─".repeat(132));

    for row in table.rows() {
        if matches!(row, TableRow::Template) {
            println!("{}", "─".repeat(132));
        }
        let [cap, roa, per, qr, dr, growth, price, eps, graham, dcf] = row.numbers();
        println!(
            "{:<22} {:<10} {:>9} {:>7} {:>7} {:>6} {:>6} {:>8} {:<11} {:>9} {:>7} {:>9} {:>9}",
            data::truncate(row.sector(), 22),
            row.ticker(),
            data::fmt_money(cap),
            data::fmt_num(roa, 1),
            data::fmt_num(per, 1),
            data::fmt_num(qr, 2),
            data::fmt_num(dr, 2),
            data::fmt_num(growth, 1),
            data::truncate(row.opinion(), 11),
            data::fmt_num(price, 2),
            data::fmt_num(eps, 2),
            data::fmt_num(graham, 2),
            data::fmt_num(dcf, 2)
        );
    }
    println!();
}

fn print_report(report: &ScreenReport) {
    println!(
        "Screened {} of {} tickers: {} passed, {} fetch failure(s)",
        report.screened, report.requested, report.passed, report.fetch_failures
    );
    if report.passed == 0 {
        println!("No company passed the filter.");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic::fmp::FmpClient;

    fn args() -> ScreenArgs {
        ScreenArgs {
            limit: None,
            output: None,
            format: None,
            config: None,
            universe_file: None,
            cache_file: None,
        }
    }

    #[test]
    fn test_limit_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.json");
        std::fs::write(&path, r#"{"max_tickers": 50}"#).unwrap();

        let from_file = load_config(&ScreenArgs {
            config: Some(path.clone()),
            ..args()
        })
        .unwrap();
        assert_eq!(from_file.max_tickers, 50);

        let overridden = load_config(&ScreenArgs {
            config: Some(path),
            limit: Some(10),
            ..args()
        })
        .unwrap();
        assert_eq!(overridden.max_tickers, 10);
    }

    #[test]
    fn test_export_format_resolution() {
        assert!(export_format(&args()).unwrap().is_none());

        let inferred = export_format(&ScreenArgs {
            output: Some(PathBuf::from("out.json")),
            ..args()
        })
        .unwrap();
        assert_eq!(inferred.map(|(_, f)| f), Some(ExportFormat::Json));

        assert!(
            export_format(&ScreenArgs {
                output: Some(PathBuf::from("out.xlsx")),
                ..args()
            })
            .is_err()
        );

        let explicit = export_format(&ScreenArgs {
            output: Some(PathBuf::from("out.txt")),
            format: Some("csv".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(explicit.map(|(_, f)| f), Some(ExportFormat::Csv));

        assert!(
            export_format(&ScreenArgs {
                output: Some(PathBuf::from("out.txt")),
                format: Some("xlsx".to_string()),
                ..args()
            })
            .is_err()
        );
    }

    #[test]
    fn test_save_cache_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FundamentalsCache::new(ScreenConfig::default().cache_ttl());
        let source = CachedSource::new(FmpClient::new("demo"), cache);

        assert!(save_cache(&source, &dir.path().join("cache.json")));
        assert!(!save_cache(&source, &dir.path().join("missing").join("cache.json")));
    }
}
