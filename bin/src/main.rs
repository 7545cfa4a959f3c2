//! intrinsic CLI binary.
//!
//! Provides command-line interface for the intrinsic valuation models and
//! the fundamentals screen.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "intrinsic=info,intrinsic_screen=info,intrinsic_fmp=warn";

#[derive(Parser)]
#[command(name = "intrinsic")]
#[command(about = "Intrinsic value models and fundamentals screening", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available valuation models
    Models {
        /// Show formulas and inputs
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the screening universe
    Universe {
        /// Filter by sector
        #[arg(short, long)]
        sector: Option<String>,

        /// Read constituents from a CSV file instead of FMP
        #[arg(long)]
        universe_file: Option<PathBuf>,
    },

    /// Value a single company
    Value {
        /// Ticker symbol
        ticker: String,

        /// Annual growth rate in percent
        #[arg(short, long, default_value = "6.0")]
        growth: f64,

        /// Discount rate in percent
        #[arg(short, long, default_value = "8.0")]
        discount: f64,

        /// Projection horizon in years
        #[arg(short, long, default_value = "5")]
        years: u32,
    },

    /// Screen the universe and value the survivors
    Screen {
        /// Maximum number of tickers to screen
        #[arg(short, long)]
        limit: Option<usize>,

        /// Export the result table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv or json); inferred from the file extension if omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Screening config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Read constituents from a CSV file instead of FMP
        #[arg(long)]
        universe_file: Option<PathBuf>,

        /// Fundamentals cache file
        #[arg(long, default_value = data::DEFAULT_CACHE_FILE)]
        cache_file: PathBuf,

        /// Fetch everything fresh and leave the cache file alone
        #[arg(long)]
        no_cache: bool,
    },
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Commands::Models { verbose } => {
            cmd::models::list_models(verbose);
        }
        Commands::Universe {
            sector,
            universe_file,
        } => {
            cmd::universe::list_universe(sector.as_deref(), universe_file.as_deref()).await?;
        }
        Commands::Value {
            ticker,
            growth,
            discount,
            years,
        } => {
            cmd::value::value_company(&ticker, growth, discount, years).await?;
        }
        Commands::Screen {
            limit,
            output,
            format,
            config,
            universe_file,
            cache_file,
            no_cache,
        } => {
            let args = cmd::screen::ScreenArgs {
                limit,
                output,
                format,
                config,
                universe_file,
                cache_file: (!no_cache).then_some(cache_file),
            };
            cmd::screen::run_screen(args).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_value_defaults() {
        let cli = Cli::parse_from(["intrinsic", "value", "AAPL"]);
        match cli.command {
            Commands::Value {
                ticker,
                growth,
                discount,
                years,
            } => {
                assert_eq!(ticker, "AAPL");
                assert!((growth - 6.0).abs() < f64::EPSILON);
                assert!((discount - 8.0).abs() < f64::EPSILON);
                assert_eq!(years, 5);
            }
            _ => panic!("expected value command"),
        }
    }

    #[test]
    fn test_screen_flags() {
        let cli = Cli::parse_from([
            "intrinsic",
            "--json-logs",
            "screen",
            "--limit",
            "20",
            "--no-cache",
            "--output",
            "out.json",
        ]);
        assert!(cli.json_logs);
        match cli.command {
            Commands::Screen {
                limit,
                output,
                no_cache,
                ..
            } => {
                assert_eq!(limit, Some(20));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert!(no_cache);
            }
            _ => panic!("expected screen command"),
        }
    }
}
