//! Value command implementation.

use crate::data;
use anyhow::{Context, Result};
use intrinsic::FundamentalsSource;
use intrinsic::valuation::{ValuationParams, Verdict, value};

/// Fetch one company and print its three intrinsic values.
pub(crate) async fn value_company(
    ticker: &str,
    growth_pct: f64,
    discount_pct: f64,
    years: u32,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Intrinsic Valuation                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let ticker = ticker.to_uppercase();
    let params = ValuationParams::from_percent(growth_pct, discount_pct, years);

    println!("Ticker:   {}", ticker);
    println!("Growth:   {:.2}%", growth_pct);
    println!("Discount: {:.2}%", discount_pct);
    println!("Horizon:  {} years", years);
    println!();

    let client = data::fmp_client()?;
    let record = client
        .fetch(&ticker)
        .await
        .with_context(|| format!("cannot fetch fundamentals for {ticker}"))?;

    println!("Price:          {}", data::fmt_num(record.price, 2));
    println!("EPS:            {}", data::fmt_num(record.eps, 2));
    println!("Book value/sh:  {}", data::fmt_num(record.book_value_per_share, 2));
    println!("Dividend:       {:.2}", record.dividend_rate);
    println!();

    let result = value(&record, &params);

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("VALUATION");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    println!("{:<28} {:>12}", "Model", "Value (USD)");
    println!("{}", "─".repeat(41));
    println!("{:<28} {:>12}", "Graham number", data::fmt_num(result.graham, 2));
    println!("{:<28} {:>12}", "Discounted cash flow", data::fmt_num(result.dcf, 2));
    println!("{:<28} {:>12}", "Dividend discount model", data::fmt_num(result.ddm, 2));
    println!("{}", "─".repeat(41));
    println!("{:<28} {:>12}", "Average", data::fmt_num(result.average(), 2));
    println!();

    if result.is_empty() {
        println!("No intrinsic value could be computed for {}.", ticker);
        println!();
        return Ok(());
    }

    if let Some(ddm) = result.ddm
        && ddm < 0.0
    {
        println!("Note: discount rate is below growth rate; the DDM value is negative.");
    }

    if let Some(discount) = result.discount_percent(record.price) {
        println!("Discount to intrinsic value: {:.2}%", discount);
    }
    match result.verdict(record.price) {
        Verdict::Undervalued => println!("{} looks undervalued.", ticker),
        Verdict::NotUndervalued => println!("{} does not look undervalued.", ticker),
        Verdict::Indeterminate => {
            println!("Verdict is indeterminate (no price, or an average of zero).");
        }
    }
    println!();

    Ok(())
}
