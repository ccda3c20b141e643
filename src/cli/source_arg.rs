//! `--source PATH[:LABEL[:MULT]]` arguments.
//!
//! The label defaults to the file stem and the multiplier to none:
//!
//! ```text
//! --source data/icpTotRaw.csv:Exp1
//! --source data/Exp2_TotICP.csv:Exp2:1000
//! --source data/exBis12TotIcp.csv:BIS
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use icp_explorer::dataset::SourceSpec;
use icp_explorer::normalize::ScaleMode;

/// One source given on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceArg {
    pub path: PathBuf,
    pub label: String,
    pub multiplier: Option<f64>,
}

impl SourceArg {
    /// Source spec with the multiplier, if any, as its scale.
    pub fn to_spec(&self) -> SourceSpec {
        let spec = SourceSpec::new(&self.path, &self.label);
        match self.multiplier {
            Some(factor) => spec.with_scale(ScaleMode::Multiplier(factor)),
            None => spec,
        }
    }
}

impl fmt::Display for SourceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.label)?;
        if let Some(factor) = self.multiplier {
            write!(f, ":{}", factor)?;
        }
        Ok(())
    }
}

impl FromStr for SourceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let path = match parts.next() {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
            _ => return Err(format!("Missing path in source '{}'. Expected PATH[:LABEL[:MULT]]", s)),
        };

        let label = match parts.next().map(str::trim) {
            Some(l) if !l.is_empty() => l.to_string(),
            _ => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let multiplier = match parts.next().map(str::trim) {
            None | Some("") => None,
            Some(m) => match m.parse::<f64>() {
                Ok(factor) if factor.is_finite() => Some(factor),
                _ => {
                    return Err(format!(
                        "Invalid multiplier '{}' in source '{}'. Expected a finite number",
                        m, s
                    ))
                }
            },
        };

        Ok(Self {
            path,
            label,
            multiplier,
        })
    }
}
