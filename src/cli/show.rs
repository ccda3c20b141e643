use anyhow::Result;
use std::io::{self, Write};

use icp_explorer::auxiliary::AuxiliaryTable;
use icp_explorer::dataset::{Filter, FilterOutcome, SessionDataset, NO_DATA_MESSAGE};
use icp_explorer::identifier::SampleType;
use icp_explorer::series::{
    build_series, plot_title, y_axis_label, ColorScheme, Dash, X_AXIS_LABEL,
};

use super::load::{load, LoadArgs};
use super::{heading, muted};

/// Print the series of one selection
pub fn run(
    args: &LoadArgs<'_>,
    shale: &str,
    element: &str,
    types: &[SampleType],
    scheme: ColorScheme,
) -> Result<()> {
    let loaded = load(args)?;
    let filter = Filter::new(shale, element).with_sample_types(types);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(
        &loaded.session,
        &filter,
        scheme,
        loaded.auxiliary.as_ref(),
        &mut out,
    )
}

/// Write a selection as text: title, axes, then one block per series
pub fn render<W: Write>(
    session: &SessionDataset,
    filter: &Filter,
    scheme: ColorScheme,
    auxiliary: Option<&AuxiliaryTable>,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", heading(&plot_title(&filter.shale_id, &filter.element)))?;

    let records = match session.filter(filter) {
        FilterOutcome::Empty => {
            writeln!(out, "{}", muted(NO_DATA_MESSAGE))?;
            return Ok(());
        }
        FilterOutcome::Records(records) => records,
    };

    writeln!(
        out,
        "x: {}  y: {}",
        X_AXIS_LABEL,
        y_axis_label(&filter.element)
    )?;

    for series in build_series(&records, scheme) {
        let dash = match series.style.dash {
            Dash::Solid => "solid",
            Dash::Dashed => "dashed",
        };
        writeln!(out)?;
        writeln!(
            out,
            "{} [{}, {} {}]",
            series.name, series.sample_type, series.style.color, dash
        )?;

        for point in &series.points {
            write!(
                out,
                "  t={:<8} {:>14.6}  {}",
                point.time, point.concentration, point.sample_id
            )?;
            if let Some(aux) = auxiliary {
                for reading in aux.readings(&point.sample_id) {
                    write!(out, "  {}={}", reading.name, reading.value)?;
                }
            }
            writeln!(out)?;
        }
    }

    Ok(())
}
