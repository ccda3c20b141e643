use anyhow::{Context, Result};
use bytes::Bytes;
use std::path::Path;

use icp_explorer::export::{read_footer_metadata, read_long_parquet};

use super::heading;

/// Display the footer metadata and a content overview of a Parquet export
pub fn run(file: &Path) -> Result<()> {
    use parquet::file::reader::{FileReader, SerializedFileReader};

    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let data = Bytes::from(
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?,
    );
    let reader =
        SerializedFileReader::new(data.clone()).context("Failed to read Parquet file")?;
    let file_metadata = reader.metadata().file_metadata();

    println!("{}", heading("ICP Export Information"));
    println!("File: {}", file.display());
    println!("Row groups: {}", reader.metadata().num_row_groups());
    println!("Total rows: {}", file_metadata.num_rows());
    println!();

    println!("Metadata Keys:");
    let mut footer: Vec<(String, String)> =
        read_footer_metadata(data.clone())?.into_iter().collect();
    footer.sort();
    for (key, value) in footer {
        let preview = if value.chars().count() > 100 {
            let head: String = value.chars().take(100).collect();
            format!("{}... ({} bytes)", head, value.len())
        } else {
            value
        };
        println!("  {}: {}", key, preview);
    }
    println!();

    println!("Schema:");
    for i in 0..file_metadata.schema_descr().num_columns() {
        let col = file_metadata.schema_descr().column(i);
        println!("  {:3}. {} ({})", i + 1, col.name(), col.physical_type());
    }
    println!();

    let table = read_long_parquet(data)?;
    let mut shales: Vec<String> = table
        .records
        .iter()
        .filter_map(|r| r.shale_id.clone())
        .collect();
    shales.sort();
    shales.dedup();
    println!("Records: {}", table.records.len());
    println!("Conditions: {}", if table.has_conditions { "yes" } else { "no" });
    println!("Shales: {}", shales.join(" "));

    Ok(())
}
