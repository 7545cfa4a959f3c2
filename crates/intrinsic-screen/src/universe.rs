//! Universe loaded from a local CSV file.
//!
//! Two header layouts are recognised: `symbol,name,sector` and the layout of
//! the public S&P 500 constituents list, `Symbol,Security,GICS Sector`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use intrinsic_traits::{IntrinsicError, Result, SectorEntry, UniverseSource};
use polars::prelude::*;
use tracing::debug;

const SYMBOL_HEADERS: [&str; 2] = ["symbol", "Symbol"];
const NAME_HEADERS: [&str; 3] = ["name", "Security", "Name"];
const SECTOR_HEADERS: [&str; 3] = ["sector", "GICS Sector", "Sector"];

fn find_column<'a>(df: &'a DataFrame, candidates: &[&str]) -> Result<&'a Column> {
    candidates
        .iter()
        .find_map(|name| df.column(name).ok())
        .ok_or_else(|| {
            IntrinsicError::InvalidData(format!(
                "Universe file has no column named any of {candidates:?}"
            ))
        })
}

/// Parse universe rows out of a frame read from CSV.
///
/// Rows with an empty symbol are skipped; a missing name or sector becomes
/// an empty string.
///
/// # Errors
///
/// Returns an error if a required column is missing or not text.
pub fn entries_from_dataframe(df: &DataFrame) -> Result<Vec<SectorEntry>> {
    let symbols = find_column(df, &SYMBOL_HEADERS)?.as_materialized_series().str()?;
    let names = find_column(df, &NAME_HEADERS)?.as_materialized_series().str()?;
    let sectors = find_column(df, &SECTOR_HEADERS)?.as_materialized_series().str()?;

    let entries = symbols
        .into_iter()
        .zip(names)
        .zip(sectors)
        .filter_map(|((symbol, name), sector)| {
            let symbol = symbol?.trim();
            if symbol.is_empty() {
                return None;
            }
            Some(SectorEntry::new(
                symbol,
                name.unwrap_or_default().trim(),
                sector.unwrap_or_default().trim(),
            ))
        })
        .collect();
    Ok(entries)
}

/// Read universe rows from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks the expected columns.
pub fn read_universe_csv(path: &Path) -> Result<Vec<SectorEntry>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    let entries = entries_from_dataframe(&df)?;
    debug!(path = %path.display(), constituents = entries.len(), "read universe file");
    Ok(entries)
}

/// Keep only the rows whose sector matches `sector`, ignoring case.
#[must_use]
pub fn filter_sector(entries: Vec<SectorEntry>, sector: &str) -> Vec<SectorEntry> {
    entries
        .into_iter()
        .filter(|entry| entry.sector.eq_ignore_ascii_case(sector))
        .collect()
}

/// A [`UniverseSource`] backed by a CSV file.
#[derive(Debug, Clone)]
pub struct CsvUniverse {
    path: PathBuf,
}

impl CsvUniverse {
    /// Use the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UniverseSource for CsvUniverse {
    async fn constituents(&self) -> Result<Vec<SectorEntry>> {
        read_universe_csv(&self.path)
    }
}
