use anyhow::Result;

use super::load::{load, LoadArgs};

/// Print one shale id per line
pub fn shales(args: &LoadArgs<'_>) -> Result<()> {
    let loaded = load(args)?;
    for shale in loaded.session.list_shale_ids() {
        println!("{}", shale);
    }
    Ok(())
}

/// Print one element symbol per line
pub fn elements(args: &LoadArgs<'_>, shale: &str) -> Result<()> {
    let loaded = load(args)?;
    let elements = loaded.session.list_elements(shale);
    if elements.is_empty() {
        log::warn!("No elements recorded for shale '{}'", shale);
    }
    for element in elements {
        println!("{}", element);
    }
    Ok(())
}
