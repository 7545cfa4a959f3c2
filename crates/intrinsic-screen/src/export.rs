//! Export of the result table as CSV or JSON.
//!
//! CSV goes through a polars [`DataFrame`] so column types survive a round
//! trip through other polars tooling. JSON is an array of flat objects keyed
//! by the same column headers, in the same order.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use intrinsic_traits::{IntrinsicError, Result};
use polars::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::table::{COLUMNS, NUMERIC_COLUMNS, ResultTable, TableRow};

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON array.
    Json,
}

impl ExportFormat {
    /// Infer the format from a `.csv` or `.json` file extension.
    ///
    /// # Errors
    ///
    /// Returns [`IntrinsicError::Export`] for any other extension, or none.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.parse(),
            None => Err(IntrinsicError::Export(format!(
                "Cannot infer export format of {}, expected a .csv or .json file",
                path.display()
            ))),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = IntrinsicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(IntrinsicError::Export(format!(
                "Unknown export format '{other}', expected csv or json"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

/// Convert the table into a [`DataFrame`] with one column per header.
///
/// # Errors
///
/// Returns an error if polars rejects the columns.
pub fn to_dataframe(table: &ResultTable) -> Result<DataFrame> {
    let rows = table.rows();
    let sector: Vec<&str> = rows.iter().map(TableRow::sector).collect();
    let ticker: Vec<&str> = rows.iter().map(TableRow::ticker).collect();
    let opinion: Vec<&str> = rows.iter().map(TableRow::opinion).collect();
    let numbers: Vec<_> = rows.iter().map(TableRow::numbers).collect();

    let mut columns = Vec::with_capacity(COLUMNS.len());
    for header in COLUMNS {
        let column = match header {
            "Sector" => Column::new(header.into(), &sector),
            "Ticker" => Column::new(header.into(), &ticker),
            "Analyst Opinion" => Column::new(header.into(), &opinion),
            _ => {
                let idx = NUMERIC_COLUMNS
                    .iter()
                    .position(|c| *c == header)
                    .ok_or_else(|| IntrinsicError::Export(format!("Unknown column {header}")))?;
                let values: Vec<Option<f64>> = numbers.iter().map(|cells| cells[idx]).collect();
                Column::new(header.into(), values)
            }
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

/// Write the table as CSV to `writer`.
///
/// # Errors
///
/// Returns an error if the frame cannot be built or written.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut df = to_dataframe(table)?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut df)?;
    Ok(())
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "Sector")]
    sector: &'a str,
    #[serde(rename = "Ticker")]
    ticker: &'a str,
    #[serde(rename = "Market Cap (USD)")]
    market_cap: Option<f64>,
    #[serde(rename = "ROA (%)")]
    return_on_assets: Option<f64>,
    #[serde(rename = "PER")]
    price_to_earnings: Option<f64>,
    #[serde(rename = "Quick Ratio")]
    quick_ratio: Option<f64>,
    #[serde(rename = "Debt Ratio")]
    debt_ratio: Option<f64>,
    #[serde(rename = "Revenue Growth (%)")]
    revenue_growth: Option<f64>,
    #[serde(rename = "Analyst Opinion")]
    opinion: &'a str,
    #[serde(rename = "Price (USD)")]
    price: Option<f64>,
    #[serde(rename = "EPS (USD)")]
    eps: Option<f64>,
    #[serde(rename = "Graham Valuation (USD)")]
    graham: Option<f64>,
    #[serde(rename = "DCF Valuation (USD)")]
    dcf: Option<f64>,
}

impl<'a> From<&'a TableRow> for JsonRow<'a> {
    fn from(row: &'a TableRow) -> Self {
        let [
            market_cap,
            return_on_assets,
            price_to_earnings,
            quick_ratio,
            debt_ratio,
            revenue_growth,
            price,
            eps,
            graham,
            dcf,
        ] = row.numbers();
        Self {
            sector: row.sector(),
            ticker: row.ticker(),
            market_cap,
            return_on_assets,
            price_to_earnings,
            quick_ratio,
            debt_ratio,
            revenue_growth,
            opinion: row.opinion(),
            price,
            eps,
            graham,
            dcf,
        }
    }
}

/// Write the table as a JSON array to `writer`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let rows: Vec<JsonRow<'_>> = table.rows().iter().map(JsonRow::from).collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    Ok(())
}

/// Write the table to `path` in `format`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export(table: &ResultTable, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        IntrinsicError::Export(format!("Cannot create {}: {e}", path.display()))
    })?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(table, &mut writer)?,
        ExportFormat::Json => write_json(table, &mut writer)?,
    }
    writer.flush()?;

    info!(path = %path.display(), %format, rows = table.len(), "exported screen");
    Ok(())
}
