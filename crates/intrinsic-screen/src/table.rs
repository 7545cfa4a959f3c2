//! Screening result table.
//!
//! The table always has the same shape: passing companies in screening
//! order, one blank template row for manual entry, then one average row per
//! sector present among the passing companies (sectors in ascending order).

use std::collections::BTreeMap;

use intrinsic_traits::{FundamentalRecord, Symbol};

/// Column headers, in table order.
pub const COLUMNS: [&str; 13] = [
    "Sector",
    "Ticker",
    "Market Cap (USD)",
    "ROA (%)",
    "PER",
    "Quick Ratio",
    "Debt Ratio",
    "Revenue Growth (%)",
    "Analyst Opinion",
    "Price (USD)",
    "EPS (USD)",
    "Graham Valuation (USD)",
    "DCF Valuation (USD)",
];

/// Headers of the numeric columns, in table order.
pub const NUMERIC_COLUMNS: [&str; 10] = [
    "Market Cap (USD)",
    "ROA (%)",
    "PER",
    "Quick Ratio",
    "Debt Ratio",
    "Revenue Growth (%)",
    "Price (USD)",
    "EPS (USD)",
    "Graham Valuation (USD)",
    "DCF Valuation (USD)",
];

/// Sector cell of the template row.
pub const TEMPLATE_LABEL: &str = "Add your own";

/// Ticker cell of a sector average row.
pub const SECTOR_AVERAGE_LABEL: &str = "Sector Avg";

/// Sector assigned to tickers missing from the sector lookup.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Numeric cells of one row, in [`NUMERIC_COLUMNS`] order.
pub type NumericCells = [Option<f64>; 10];

/// A company that passed the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningRow {
    /// Sector label from the universe.
    pub sector: String,
    /// The fetched fundamentals.
    pub record: FundamentalRecord,
    /// Graham number.
    pub graham: Option<f64>,
    /// DCF value.
    pub dcf: Option<f64>,
}

impl ScreeningRow {
    /// Ticker of the underlying record.
    #[must_use]
    pub fn ticker(&self) -> &Symbol {
        &self.record.ticker
    }

    /// Numeric cells in column order.
    #[must_use]
    pub fn numbers(&self) -> NumericCells {
        let r = &self.record;
        [
            r.market_cap,
            r.return_on_assets,
            r.price_to_earnings,
            r.quick_ratio,
            r.debt_ratio,
            r.revenue_growth_percent,
            r.price,
            r.eps,
            self.graham,
            self.dcf,
        ]
    }
}

/// Column-wise mean of a sector's passing companies.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorAverageRow {
    /// Sector label.
    pub sector: String,
    /// Number of companies averaged.
    pub members: usize,
    /// Mean of each numeric column; `None` where no member had a value.
    pub values: NumericCells,
}

impl SectorAverageRow {
    /// Average the numeric columns of `rows`, skipping absent cells.
    #[must_use]
    pub fn from_rows(sector: impl Into<String>, rows: &[&ScreeningRow]) -> Self {
        let mut sums = [0.0_f64; 10];
        let mut counts = [0_usize; 10];
        for row in rows {
            for (idx, cell) in row.numbers().into_iter().enumerate() {
                if let Some(value) = cell {
                    sums[idx] += value;
                    counts[idx] += 1;
                }
            }
        }

        let mut values: NumericCells = [None; 10];
        for idx in 0..values.len() {
            if counts[idx] > 0 {
                values[idx] = Some(sums[idx] / counts[idx] as f64);
            }
        }

        Self {
            sector: sector.into(),
            members: rows.len(),
            values,
        }
    }

    /// Mean of the column named `header`, if it is numeric and defined.
    #[must_use]
    pub fn value(&self, header: &str) -> Option<f64> {
        let idx = NUMERIC_COLUMNS.iter().position(|c| *c == header)?;
        self.values[idx]
    }
}

/// One row of the result table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// A company that passed the filter.
    Company(ScreeningRow),
    /// Blank row left for manual entry.
    Template,
    /// Per-sector average.
    SectorAverage(SectorAverageRow),
}

impl TableRow {
    /// Sector cell.
    #[must_use]
    pub fn sector(&self) -> &str {
        match self {
            Self::Company(row) => &row.sector,
            Self::Template => TEMPLATE_LABEL,
            Self::SectorAverage(avg) => &avg.sector,
        }
    }

    /// Ticker cell.
    #[must_use]
    pub fn ticker(&self) -> &str {
        match self {
            Self::Company(row) => row.ticker().as_str(),
            Self::Template => "",
            Self::SectorAverage(_) => SECTOR_AVERAGE_LABEL,
        }
    }

    /// Analyst opinion cell.
    #[must_use]
    pub fn opinion(&self) -> &str {
        match self {
            Self::Company(row) => &row.record.analyst_recommendation,
            Self::Template | Self::SectorAverage(_) => "",
        }
    }

    /// Numeric cells in column order.
    #[must_use]
    pub fn numbers(&self) -> NumericCells {
        match self {
            Self::Company(row) => row.numbers(),
            Self::Template => [None; 10],
            Self::SectorAverage(avg) => avg.values,
        }
    }
}

/// The assembled screening output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<TableRow>,
}

impl ResultTable {
    /// Assemble the table from the passing companies, in screening order.
    ///
    /// Appends the template row and one average row per distinct sector.
    #[must_use]
    pub fn build(companies: Vec<ScreeningRow>) -> Self {
        let mut by_sector: BTreeMap<&str, Vec<&ScreeningRow>> = BTreeMap::new();
        for row in &companies {
            by_sector.entry(row.sector.as_str()).or_default().push(row);
        }
        let averages: Vec<SectorAverageRow> = by_sector
            .into_iter()
            .map(|(sector, members)| SectorAverageRow::from_rows(sector, &members))
            .collect();

        let mut rows = Vec::with_capacity(companies.len() + 1 + averages.len());
        rows.extend(companies.into_iter().map(TableRow::Company));
        rows.push(TableRow::Template);
        rows.extend(averages.into_iter().map(TableRow::SectorAverage));

        Self { rows }
    }

    /// All rows, in table order.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rows, including the template and average rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows at all (only true for `default()`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The passing companies.
    pub fn companies(&self) -> impl Iterator<Item = &ScreeningRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Company(company) => Some(company),
            _ => None,
        })
    }

    /// The sector average rows.
    pub fn sector_averages(&self) -> impl Iterator<Item = &SectorAverageRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::SectorAverage(avg) => Some(avg),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn company(ticker: &str, sector: &str, market_cap: Option<f64>) -> ScreeningRow {
        ScreeningRow {
            sector: sector.to_string(),
            record: FundamentalRecord {
                market_cap,
                price: Some(50.0),
                ..FundamentalRecord::empty(ticker)
            },
            graham: Some(40.0),
            dcf: None,
        }
    }

    #[test]
    fn test_columns_line_up() {
        for header in NUMERIC_COLUMNS {
            assert!(COLUMNS.contains(&header));
        }
        assert_eq!(COLUMNS.len(), NUMERIC_COLUMNS.len() + 3);
    }

    #[test]
    fn test_row_order() {
        let table = ResultTable::build(vec![
            company("XOM", "Energy", Some(400.0)),
            company("AAPL", "Information Technology", Some(3000.0)),
            company("CVX", "Energy", Some(300.0)),
        ]);

        let tickers: Vec<&str> = table.rows().iter().map(TableRow::ticker).collect();
        assert_eq!(tickers, ["XOM", "AAPL", "CVX", "", "Sector Avg", "Sector Avg"]);

        let sectors: Vec<&str> = table.rows().iter().map(TableRow::sector).collect();
        assert_eq!(
            sectors,
            [
                "Energy",
                "Information Technology",
                "Energy",
                TEMPLATE_LABEL,
                "Energy",
                "Information Technology",
            ]
        );
    }

    #[test]
    fn test_sector_average_market_cap() {
        let table = ResultTable::build(vec![
            company("A", "Utilities", Some(100.0)),
            company("B", "Utilities", Some(200.0)),
        ]);

        let averages: Vec<_> = table.sector_averages().collect();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].members, 2);
        assert_relative_eq!(averages[0].value("Market Cap (USD)").unwrap(), 150.0);
        assert_relative_eq!(averages[0].value("Graham Valuation (USD)").unwrap(), 40.0);
        assert_eq!(averages[0].value("DCF Valuation (USD)"), None);
        assert_eq!(averages[0].value("Analyst Opinion"), None);
    }

    #[test]
    fn test_sector_average_skips_missing_cells() {
        let table = ResultTable::build(vec![
            company("A", "Utilities", Some(100.0)),
            company("B", "Utilities", None),
        ]);
        let avg = table.sector_averages().next().unwrap();
        assert_relative_eq!(avg.value("Market Cap (USD)").unwrap(), 100.0);
    }

    #[test]
    fn test_empty_screen_still_has_template() {
        let table = ResultTable::build(Vec::new());
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0], TableRow::Template);
        assert_eq!(table.companies().count(), 0);
        assert_eq!(table.sector_averages().count(), 0);
    }

    #[test]
    fn test_template_and_average_cells() {
        assert_eq!(TableRow::Template.opinion(), "");
        assert_eq!(TableRow::Template.numbers(), [None; 10]);

        let row = TableRow::Company(company("A", "Utilities", Some(1.0)));
        assert_eq!(row.opinion(), "N/A");
        assert_eq!(row.numbers()[0], Some(1.0));
    }
}
