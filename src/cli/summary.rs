use anyhow::Result;

use super::heading;
use super::load::{load, LoadArgs};

/// Load all sources and print what was found
pub fn run(args: &LoadArgs<'_>) -> Result<()> {
    let loaded = load(args)?;
    let baseline = loaded.session.baseline();

    println!("{}", heading("ICP Baseline Summary"));
    println!();

    println!("Sources:");
    for source in &baseline.stats().sources {
        println!("  {}", source);
    }
    println!();

    println!("Records: {}", baseline.len());
    println!("Cells dropped: {}", baseline.stats().total_dropped());
    println!(
        "Conditions: {}",
        if baseline.conditions_derived() { "derived" } else { "off" }
    );
    println!();

    println!("Shales:");
    for shale in baseline.list_shale_ids() {
        println!("  {:8} {}", shale, baseline.list_elements(&shale).join(" "));
    }

    if let Some(aux) = &loaded.auxiliary {
        println!();
        println!(
            "Auxiliary table: {} samples ({})",
            aux.len(),
            aux.columns().join(", ")
        );
    }

    Ok(())
}
