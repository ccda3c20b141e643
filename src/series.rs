//! # Plot Series
//!
//! Groups a filtered selection into one line series per `sample_combo` and
//! assigns each series its colour and dash. Rendering itself is left to the
//! host; this module only fixes what gets drawn.
//!
//! ## Colour Schemes
//!
//! | scheme | colour | dash |
//! |--------|--------|------|
//! | `ByGroup` | A `#8B0000`, D `#FF6347`, B `#00008B`, C `#4682B4`, other `#808080` | solid |
//! | `ByExposure` | `#FF0000` with O2, `#0000FF` without | solid with CO2, dashed without |

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::condition::Condition;
use crate::identifier::{Group, SampleType};
use crate::record::MeasurementRecord;

/// X-axis label of every plot
pub const X_AXIS_LABEL: &str = "Time (days)";

/// Colour of series whose group is not recognized
pub const FALLBACK_COLOR: &str = "#808080";

/// How series are coloured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    /// One colour per treatment group
    #[default]
    ByGroup,
    /// Colour by O2, dash by CO2
    ByExposure,
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::ByGroup => write!(f, "group"),
            ColorScheme::ByExposure => write!(f, "exposure"),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "group" | "by-group" => Ok(ColorScheme::ByGroup),
            "exposure" | "by-exposure" | "condition" => Ok(ColorScheme::ByExposure),
            _ => Err(format!(
                "Unknown color scheme '{}'. Valid options: group, exposure",
                s
            )),
        }
    }
}

/// Line dash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    /// Continuous line
    Solid,
    /// Dashed line
    Dashed,
}

/// Visual style of one series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesStyle {
    /// Hex colour shared by line and markers
    pub color: &'static str,
    /// Line dash
    pub dash: Dash,
}

impl SeriesStyle {
    /// Style of a series under a scheme, decided by its first record
    pub fn for_record(record: &MeasurementRecord, scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::ByGroup => Self {
                color: group_color(record.group),
                dash: Dash::Solid,
            },
            ColorScheme::ByExposure => {
                let condition = record
                    .condition
                    .unwrap_or_else(|| Condition::for_optional_group(record.group));
                Self {
                    color: if condition.o2 { "#FF0000" } else { "#0000FF" },
                    dash: if condition.co2 { Dash::Solid } else { Dash::Dashed },
                }
            }
        }
    }
}

fn group_color(group: Option<Group>) -> &'static str {
    match group {
        Some(Group::A) => "#8B0000",
        Some(Group::D) => "#FF6347",
        Some(Group::B) => "#00008B",
        Some(Group::C) => "#4682B4",
        _ => FALLBACK_COLOR,
    }
}

/// One plotted point. `sample_id` is the hover text and the removal key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Days
    pub time: f64,
    /// Concentration
    pub concentration: f64,
    /// Raw sample identifier
    pub sample_id: String,
}

/// One line of the plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend name: the sample combo
    pub name: String,
    /// Sample type of the first point
    pub sample_type: SampleType,
    /// Points in selection order
    pub points: Vec<SeriesPoint>,
    /// Colour and dash
    pub style: SeriesStyle,
}

/// Group records by `sample_combo`, in order of first appearance.
///
/// Records without a combo or a time are not plottable and are skipped.
pub fn build_series(records: &[MeasurementRecord], scheme: ColorScheme) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();

    for record in records {
        let (Some(combo), Some(time)) = (record.sample_combo.as_ref(), record.time) else {
            continue;
        };
        let point = SeriesPoint {
            time,
            concentration: record.concentration,
            sample_id: record.sample_id.clone(),
        };

        match series.iter_mut().find(|s| &s.name == combo) {
            Some(existing) => existing.points.push(point),
            None => series.push(Series {
                name: combo.clone(),
                sample_type: record.sample_type,
                points: vec![point],
                style: SeriesStyle::for_record(record, scheme),
            }),
        }
    }

    series
}

/// Plot title for a selection
pub fn plot_title(shale_id: &str, element: &str) -> String {
    format!("Shale {}: [{}]", shale_id, element)
}

/// Y-axis label for an element
pub fn y_axis_label(element: &str) -> String {
    format!("{} Concentration", element)
}
