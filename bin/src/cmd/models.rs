//! Models command implementation.

use intrinsic::valuation::{ValuationParams, available_models};

/// List the valuation models.
pub(crate) fn list_models(verbose: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Valuation Models                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for model in available_models() {
        if verbose {
            println!("  {:8} - {}", model.name, model.title);
            println!("  {:8}   {}", "", model.formula);
            println!("  {:8}   inputs: {}", "", model.inputs.join(", "));
            if !model.screened {
                println!("  {:8}   (not reported by the screen)", "");
            }
            println!();
        } else {
            println!("  {:8} {}", model.name, model.title);
        }
    }

    if verbose {
        let single = ValuationParams::default();
        let screen = ValuationParams::screening();
        println!("Default rates:");
        println!(
            "  value:  growth {:.1}%, discount {:.1}%, {} years",
            single.growth_rate * 100.0,
            single.discount_rate * 100.0,
            single.years
        );
        println!(
            "  screen: growth {:.1}%, discount {:.1}%, {} years",
            screen.growth_rate * 100.0,
            screen.discount_rate * 100.0,
            screen.years
        );
    } else {
        println!("\nUse --verbose for formulas and inputs.");
    }
    println!();
}
