//! TOML pipeline configuration.
//!
//! Instead of passing every source on the command line, the whole pipeline can
//! be described in one file:
//!
//! ```toml
//! # icp.toml
//! derive_conditions = true
//! molar_conversion = false
//!
//! [molar_masses]
//! Xx = 40.0
//!
//! [[sources]]
//! path = "data/icpTotRaw.csv"
//! label = "Exp1"
//!
//! [[sources]]
//! path = "data/Exp2_TotICP.csv"
//! label = "Exp2"
//! multiplier = 1000.0
//!
//! [[sources]]
//! path = "data/exBis12TotIcp.csv"
//! label = "BIS"
//!
//! [auxiliary]
//! path = "data/phO2.csv"
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::dataset::{PipelineOptions, SourceFormat, SourceSpec};
use crate::normalize::{MolarMassTable, ScaleMode};

/// Root configuration structure for icp.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineConfig {
    /// Attach O2/CO2 conditions (default: true).
    pub derive_conditions: Option<bool>,

    /// Convert every source without its own multiplier from ppb to mM.
    pub molar_conversion: Option<bool>,

    /// Molar mass overrides and additions, in g/mol.
    #[serde(default)]
    pub molar_masses: BTreeMap<String, f64>,

    /// Sources in load order.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    /// Optional pH / dissolved-O2 side table.
    pub auxiliary: Option<AuxiliaryConfig>,

    #[serde(skip)]
    base_dir: PathBuf,
}

/// One `[[sources]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// File path.
    pub path: PathBuf,

    /// Experiment label.
    pub label: String,

    /// Flat multiplier applied to every concentration.
    pub multiplier: Option<f64>,

    /// Convert this source from ppb to mM.
    pub molar: Option<bool>,

    /// Shale id suffix (defaults to `-BIS` for the `BIS` label).
    pub shale_suffix: Option<String>,

    /// File layout.
    #[serde(default)]
    pub format: SourceFormat,
}

/// The `[auxiliary]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct AuxiliaryConfig {
    /// CSV path.
    pub path: PathBuf,
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from a TOML string. Paths stay relative to the working directory.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Build the source list
    pub fn to_sources(&self) -> Result<Vec<SourceSpec>> {
        let global_molar = self.molar_conversion.unwrap_or(false);

        self.sources
            .iter()
            .map(|source| {
                let scale = match (source.multiplier, source.molar) {
                    (Some(_), Some(true)) => bail!(
                        "Source '{}' sets both multiplier and molar",
                        source.label
                    ),
                    (Some(factor), _) if !factor.is_finite() => bail!(
                        "Source '{}' has a non-finite multiplier",
                        source.label
                    ),
                    (Some(factor), _) => ScaleMode::Multiplier(factor),
                    (None, Some(true)) => ScaleMode::Molar,
                    (None, Some(false)) => ScaleMode::Identity,
                    (None, None) if global_molar => ScaleMode::Molar,
                    (None, None) => ScaleMode::Identity,
                };

                let mut spec = SourceSpec::new(self.resolve(&source.path), &source.label)
                    .with_scale(scale)
                    .with_format(source.format);
                if let Some(suffix) = &source.shale_suffix {
                    spec = spec.with_shale_suffix(suffix);
                }
                Ok(spec)
            })
            .collect()
    }

    /// Pipeline switches with the molar mass overrides applied.
    ///
    /// Every molar mass must be finite and greater than zero.
    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        let mut molar_masses = MolarMassTable::standard();
        for (symbol, mass) in &self.molar_masses {
            if !(mass.is_finite() && *mass > 0.0) {
                bail!("Molar mass of '{}' must be a positive number, got {}", symbol, mass);
            }
            molar_masses.insert(symbol.clone(), *mass);
        }
        Ok(PipelineOptions {
            derive_conditions: self.derive_conditions.unwrap_or(true),
            molar_masses,
        })
    }

    /// Resolved path of the auxiliary table, if configured
    pub fn auxiliary_path(&self) -> Option<PathBuf> {
        self.auxiliary.as_ref().map(|aux| self.resolve(&aux.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        derive_conditions = false
        molar_conversion = false

        [molar_masses]
        Xx = 40.0

        [[sources]]
        path = "data/icpTotRaw.csv"
        label = "Exp1"

        [[sources]]
        path = "data/Exp2_TotICP.csv"
        label = "Exp2"
        multiplier = 1000.0

        [[sources]]
        path = "data/exBis12TotIcp.csv"
        label = "BIS"

        [[sources]]
        path = "cleaned_icp_data.parquet"
        label = "cleaned"
        format = "long-parquet"
        shale_suffix = ""

        [auxiliary]
        path = "data/phO2.csv"
    "#;

    #[test]
    fn test_parse_config() {
        let config = PipelineConfig::from_str(FULL).unwrap();
        let sources = config.to_sources().unwrap();

        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].scale, ScaleMode::Identity);
        assert_eq!(sources[1].scale, ScaleMode::Multiplier(1000.0));
        assert_eq!(sources[2].shale_suffix, "-BIS");
        assert_eq!(sources[3].format, SourceFormat::LongParquet);
        assert_eq!(sources[3].shale_suffix, "");

        let options = config.pipeline_options().unwrap();
        assert!(!options.derive_conditions);
        assert_eq!(options.molar_masses.get("Xx"), Some(40.0));
        assert!(options.molar_masses.get("Fe").is_some());

        assert_eq!(config.auxiliary_path(), Some(PathBuf::from("data/phO2.csv")));
    }

    #[test]
    fn test_global_molar_conversion() {
        let toml = r#"
            molar_conversion = true

            [[sources]]
            path = "a.csv"
            label = "Exp1"

            [[sources]]
            path = "b.csv"
            label = "Exp2"
            multiplier = 1000.0

            [[sources]]
            path = "c.csv"
            label = "Exp3"
            molar = false
        "#;

        let sources = PipelineConfig::from_str(toml).unwrap().to_sources().unwrap();
        assert_eq!(sources[0].scale, ScaleMode::Molar);
        assert_eq!(sources[1].scale, ScaleMode::Multiplier(1000.0));
        assert_eq!(sources[2].scale, ScaleMode::Identity);
    }

    #[test]
    fn test_conflicting_scale() {
        let toml = r#"
            [[sources]]
            path = "a.csv"
            label = "Exp1"
            multiplier = 2.0
            molar = true
        "#;

        let err = PipelineConfig::from_str(toml).unwrap().to_sources().unwrap_err();
        assert!(err.to_string().contains("Exp1"));
    }

    #[test]
    fn test_invalid_molar_mass() {
        for mass in ["0.0", "-12.5", "nan", "inf"] {
            let toml = format!("molar_conversion = true\n\n[molar_masses]\nXx = {}\n", mass);
            let config = PipelineConfig::from_str(&toml).unwrap();
            let err = config.pipeline_options().unwrap_err();
            assert!(err.to_string().contains("Xx"), "{}", mass);
        }
    }

    #[test]
    fn test_paths_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icp.toml");
        std::fs::write(&path, FULL).unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        let sources = config.to_sources().unwrap();
        assert_eq!(sources[0].path, dir.path().join("data/icpTotRaw.csv"));
        assert_eq!(config.auxiliary_path(), Some(dir.path().join("data/phO2.csv")));
    }

    #[test]
    fn test_empty_config() {
        let config = PipelineConfig::from_str("").unwrap();
        assert!(config.to_sources().unwrap().is_empty());
        assert!(config.pipeline_options().unwrap().derive_conditions);
        assert_eq!(config.auxiliary_path(), None);
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_file(Path::new("/nonexistent/icp.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
