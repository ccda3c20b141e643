use anyhow::{bail, Context, Result};
use log::info;
use std::path::Path;

use icp_explorer::auxiliary::AuxiliaryTable;
use icp_explorer::config::PipelineConfig;
use icp_explorer::dataset::SessionDataset;

use super::SourceArg;

/// Global arguments that decide what gets loaded
pub struct LoadArgs<'a> {
    pub config: Option<&'a Path>,
    pub sources: &'a [SourceArg],
    pub no_conditions: bool,
}

/// A loaded session plus the optional auxiliary table
pub struct Loaded {
    pub session: SessionDataset,
    pub auxiliary: Option<AuxiliaryTable>,
}

/// Resolve configuration and flags, then build the baseline
pub fn load(args: &LoadArgs<'_>) -> Result<Loaded> {
    let config = match args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    let mut sources = config.to_sources()?;
    sources.extend(args.sources.iter().map(SourceArg::to_spec));
    if sources.is_empty() {
        bail!("No sources given. Pass --source PATH[:LABEL[:MULT]] or --config FILE");
    }

    let mut options = config.pipeline_options()?;
    if args.no_conditions {
        options.derive_conditions = false;
    }

    info!("Loading {} sources", sources.len());
    let session = SessionDataset::load(&sources, &options).context("Failed to load sources")?;

    let auxiliary = match config.auxiliary_path() {
        Some(path) => Some(AuxiliaryTable::from_csv_path(&path).with_context(|| {
            format!("Failed to read auxiliary table: {}", path.display())
        })?),
        None => None,
    };

    Ok(Loaded { session, auxiliary })
}
