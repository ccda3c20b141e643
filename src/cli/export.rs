use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use icp_explorer::export::ExportFormat;

use super::load::{load, LoadArgs};

/// Export format from a file extension, CSV unless it says Parquet
pub fn format_for_path(path: &Path) -> ExportFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<ExportFormat>().ok())
        .unwrap_or_default()
}

/// Load all sources and write the long table
pub fn run(args: &LoadArgs<'_>, output: &Path, format: Option<ExportFormat>) -> Result<()> {
    let loaded = load(args)?;
    let format = format.unwrap_or_else(|| format_for_path(output));

    info!("Exporting {} records as {}", loaded.session.len(), format);
    let bytes = loaded
        .session
        .export_to_path(output, format)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Wrote {} records to {} ({} bytes)",
        loaded.session.len(),
        output.display(),
        bytes
    );
    Ok(())
}
