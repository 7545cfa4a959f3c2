//! Universe command implementation.

use crate::data;
use anyhow::Result;
use intrinsic::screen::filter_sector;
use std::collections::BTreeMap;
use std::path::Path;

/// List the screening universe, optionally limited to one sector.
pub(crate) async fn list_universe(sector: Option<&str>, file: Option<&Path>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Screening Universe                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let mut entries = data::load_universe(file).await?;
    if let Some(sector) = sector {
        entries = filter_sector(entries, sector);
    }

    if entries.is_empty() {
        println!("No constituents found.");
        println!();
        return Ok(());
    }

    println!("{:<8} {:<36} {}", "Symbol", "Name", "Sector");
    println!("{}", "─".repeat(70));
    for entry in &entries {
        println!(
            "{:<8} {:<36} {}",
            entry.symbol,
            data::truncate(&entry.name, 36),
            entry.sector
        );
    }
    println!();

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in &entries {
        *counts.entry(entry.sector.as_str()).or_default() += 1;
    }
    println!("{} constituents in {} sector(s):", entries.len(), counts.len());
    for (sector, count) in counts {
        println!("  {:<30} {:>4}", sector, count);
    }
    println!();

    Ok(())
}
