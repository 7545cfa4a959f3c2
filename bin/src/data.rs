//! Data loading utilities for the intrinsic CLI.

use anyhow::{Context, Result};
use intrinsic::SectorEntry;
use intrinsic::fmp::FmpClient;
use intrinsic::screen::read_universe_csv;
use std::path::Path;

/// Cache file used by `intrinsic screen` unless told otherwise.
pub(crate) const DEFAULT_CACHE_FILE: &str = ".intrinsic-cache.json";

/// Create the FMP client from the environment.
pub(crate) fn fmp_client() -> Result<FmpClient> {
    FmpClient::from_env().context("cannot create FMP client (set FMP_API_KEY or add it to .env)")
}

/// Load the universe from `file` if given, else the S&P 500 from FMP.
pub(crate) async fn load_universe(file: Option<&Path>) -> Result<Vec<SectorEntry>> {
    match file {
        Some(path) => read_universe_csv(path)
            .with_context(|| format!("cannot read universe file {}", path.display())),
        None => {
            let client = fmp_client()?;
            client
                .sp500_constituents()
                .await
                .context("cannot fetch S&P 500 constituents")
        }
    }
}

/// Format an optional number with `decimals` places, `-` when absent.
pub(crate) fn fmt_num(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}

/// Format a dollar amount in thousands, millions, billions or trillions.
pub(crate) fn fmt_money(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };
    let abs = v.abs();
    if abs >= 1e12 {
        format!("{:.2}T", v / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", v / 1e3)
    } else {
        format!("{v:.2}")
    }
}

/// Truncate `text` to at most `width` characters.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
