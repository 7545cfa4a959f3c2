//! Fundamentals screening for intrinsic.
//!
//! Takes a universe of tickers with sector labels, fetches fundamentals for
//! each through a [`FundamentalsSource`](intrinsic_traits::FundamentalsSource),
//! keeps the companies that pass the quality filter, values them with the
//! Graham and DCF models and assembles a [`ResultTable`] with per-sector
//! averages.
//!
//! # Example
//!
//! ```no_run
//! use intrinsic_screen::{ScreenConfig, Screener, export, ExportFormat};
//! # use intrinsic_traits::FundamentalsSource;
//! # async fn run<S: FundamentalsSource>(source: S) -> intrinsic_traits::Result<()> {
//! let screener = Screener::new(source, ScreenConfig::default());
//! let universe = intrinsic_screen::CsvUniverse::new("universe.csv");
//! let (table, report) = screener.run_universe(&universe).await?;
//! println!("{} of {} passed", report.passed, report.screened);
//! export(&table, "screen.csv".as_ref(), ExportFormat::Csv)?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod criteria;
pub mod export;
pub mod pipeline;
pub mod table;
pub mod universe;

pub use cache::{CacheStats, CachedSource, FundamentalsCache};
pub use config::ScreenConfig;
pub use criteria::{Clause, ScreeningCriteria};
pub use export::{ExportFormat, export, to_dataframe};
pub use pipeline::{ScreenReport, Screener, sector_lookup};
pub use table::{ResultTable, ScreeningRow, SectorAverageRow, TableRow};
pub use universe::{CsvUniverse, filter_sector, read_universe_csv};
