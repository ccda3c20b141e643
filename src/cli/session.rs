//! Line-oriented interactive session.
//!
//! ```text
//! > filter 64 Mg disk
//! > remove 7.5 64Dt7.5 Disk
//! > reset
//! > export cleaned_icp_data.csv
//! > quit
//! ```

use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::Path;

use icp_explorer::auxiliary::AuxiliaryTable;
use icp_explorer::dataset::{Filter, SessionDataset};
use icp_explorer::identifier::SampleType;
use icp_explorer::record::RecordKey;
use icp_explorer::series::ColorScheme;

use super::export::format_for_path;
use super::load::{load, LoadArgs};
use super::show::render;

const HELP: &str = "\
Commands:
  shales                         list shale ids
  elements SHALE                 list elements of a shale
  filter SHALE ELEMENT [TYPE..]  select and print series (TYPE: disk, dust, unknown)
  scheme group|exposure          set series colouring
  remove TIME SAMPLE_ID          remove a point of the current element
  remove-scoped TIME SAMPLE_ID   remove a point of the current selection only
  reset                          restore all removed points
  export PATH [csv|parquet]      write the current records
  status                         show record counts
  quit                           leave the session";

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Shales,
    Elements(String),
    Filter(Filter),
    Scheme(ColorScheme),
    Remove { time: f64, sample_id: String, scoped: bool },
    Reset,
    Export(String, Option<String>),
    Status,
    Help,
    Quit,
}

/// The text after the first `words` whitespace-separated tokens, with inner spacing kept
fn rest_after(line: &str, words: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..words {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let command = match (verb, rest.as_slice()) {
        ("shales", []) => Command::Shales,
        ("elements", [shale]) => Command::Elements(shale.to_string()),
        ("filter", [shale, element, types @ ..]) => {
            let types = types
                .iter()
                .map(|t| t.parse::<SampleType>())
                .collect::<Result<Vec<_>, _>>()?;
            Command::Filter(Filter::new(*shale, *element).with_sample_types(&types))
        }
        ("scheme", [scheme]) => Command::Scheme(scheme.parse()?),
        ("remove" | "remove-scoped", [time, _, ..]) => {
            let time = time
                .parse::<f64>()
                .map_err(|_| format!("Invalid time '{}'", time))?;
            Command::Remove {
                time,
                sample_id: rest_after(line, 2).to_string(),
                scoped: verb == "remove-scoped",
            }
        }
        ("reset", []) => Command::Reset,
        ("export", [path]) => Command::Export(path.to_string(), None),
        ("export", [path, format]) => Command::Export(path.to_string(), Some(format.to_string())),
        ("status", []) => Command::Status,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("Cannot parse '{}'. Type 'help' for commands", line.trim())),
    };
    Ok(Some(command))
}

struct Repl<'a> {
    session: SessionDataset,
    auxiliary: Option<&'a AuxiliaryTable>,
    filter: Option<Filter>,
    scheme: ColorScheme,
}

impl Repl<'_> {
    /// Execute one command. Returns false when the session should end.
    fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<bool> {
        match command {
            Command::Shales => writeln!(out, "{}", self.session.list_shale_ids().join(" "))?,
            Command::Elements(shale) => {
                writeln!(out, "{}", self.session.list_elements(&shale).join(" "))?
            }
            Command::Filter(filter) => {
                render(&self.session, &filter, self.scheme, self.auxiliary, out)?;
                self.filter = Some(filter);
            }
            Command::Scheme(scheme) => {
                self.scheme = scheme;
                if let Some(filter) = &self.filter {
                    render(&self.session, filter, scheme, self.auxiliary, out)?;
                }
            }
            Command::Remove {
                time,
                sample_id,
                scoped,
            } => match &self.filter {
                None => writeln!(out, "No selection. Use 'filter' first")?,
                Some(filter) => {
                    let key = RecordKey::new(sample_id, time, filter.element.clone());
                    let removed = if scoped {
                        self.session.remove_in_scope(&key, filter)
                    } else {
                        self.session.remove(&key)
                    };
                    writeln!(out, "Removed {} record(s)", removed)?;
                    if removed > 0 {
                        render(&self.session, filter, self.scheme, self.auxiliary, out)?;
                    }
                }
            },
            Command::Reset => {
                self.session.reset();
                writeln!(out, "Reset to {} records", self.session.len())?;
            }
            Command::Export(path, format) => {
                let format = match format {
                    Some(f) => f.parse().map_err(anyhow::Error::msg)?,
                    None => format_for_path(Path::new(&path)),
                };
                let bytes = self.session.export_to_path(&path, format)?;
                writeln!(out, "Wrote {} records to {} ({} bytes)", self.session.len(), path, bytes)?;
            }
            Command::Status => writeln!(
                out,
                "{} records ({} removed, baseline {})",
                self.session.len(),
                self.session.removed_count(),
                self.session.baseline().len()
            )?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

/// Drive a session from line input until `quit` or end of input
fn run_lines<R: BufRead, W: Write>(
    session: SessionDataset,
    auxiliary: Option<&AuxiliaryTable>,
    input: R,
    out: &mut W,
) -> Result<SessionDataset> {
    let mut repl = Repl {
        session,
        auxiliary,
        filter: None,
        scheme: ColorScheme::default(),
    };

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match repl.execute(command, out) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => writeln!(out, "Error: {:#}", e)?,
            },
            Err(message) => writeln!(out, "{}", message)?,
        }
        out.flush()?;
    }

    Ok(repl.session)
}

/// Load all sources and read commands from stdin
pub fn run(args: &LoadArgs<'_>) -> Result<()> {
    let loaded = load(args)?;
    println!(
        "Loaded {} records. Type 'help' for commands.",
        loaded.session.len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_lines(loaded.session, loaded.auxiliary.as_ref(), stdin.lock(), &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use icp_explorer::dataset::BaselineDataset;
    use icp_explorer::identifier::SampleIdentifier;
    use icp_explorer::record::MeasurementRecord;
    use std::sync::Arc;

    fn session() -> SessionDataset {
        let records = ["64Dt0 Disk", "64Dt7.5 Disk", "64Dt7.5 Dust"]
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                MeasurementRecord::from_identifier(
                    &SampleIdentifier::parse(raw),
                    "",
                    "Exp1",
                    "Mg",
                    i as f64,
                )
            })
            .collect();
        SessionDataset::new(Arc::new(BaselineDataset::from_records(records, false)))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   "), Ok(None));
        assert_eq!(
            parse_command("remove 7.5 64Dt7.5 Disk"),
            Ok(Some(Command::Remove {
                time: 7.5,
                sample_id: "64Dt7.5 Disk".to_string(),
                scoped: false
            }))
        );
        assert_eq!(
            parse_command("filter 64 Mg dust"),
            Ok(Some(Command::Filter(
                Filter::new("64", "Mg").with_sample_types(&[SampleType::Dust])
            )))
        );
        assert!(parse_command("filter 64 Mg rock").is_err());
        assert_eq!(
            parse_command("  remove-scoped 7.5 64Dt7.5  Disk"),
            Ok(Some(Command::Remove {
                time: 7.5,
                sample_id: "64Dt7.5  Disk".to_string(),
                scoped: true
            }))
        );
        assert!(parse_command("remove soon 64Dt0").is_err());
        assert!(parse_command("remove 7.5").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_remove_and_reset() {
        let input = "filter 64 Mg\nremove 7.5 64Dt7.5 Disk\nremove 7.5 64Dt7.5 Disk\nstatus\nreset\nstatus\nquit\nstatus\n";
        let mut out = Vec::new();
        let session = run_lines(session(), None, input.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Shale 64: [Mg]"));
        assert!(text.contains("Removed 1 record(s)"));
        assert!(text.contains("Removed 0 record(s)"));
        assert!(text.contains("2 records (1 removed, baseline 3)"));
        assert!(text.contains("Reset to 3 records"));
        // nothing after quit runs
        assert_eq!(text.matches("records (").count(), 2);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_remove_keeps_inner_spacing() {
        let record = MeasurementRecord::from_identifier(
            &SampleIdentifier::parse("64Dt7.5  Disk"),
            "",
            "Exp1",
            "Mg",
            1.0,
        );
        let baseline = BaselineDataset::from_records(vec![record], false);
        let input = "filter 64 Mg\nremove 7.5 64Dt7.5  Disk\n";
        let mut out = Vec::new();
        let session = run_lines(SessionDataset::new(Arc::new(baseline)), None, input.as_bytes(), &mut out).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("Removed 1 record(s)"));
        assert!(session.is_empty());
    }

    #[test]
    fn test_remove_needs_selection() {
        let mut out = Vec::new();
        let session = run_lines(session(), None, "remove 0 64Dt0 Disk\n".as_bytes(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No selection"));
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_empty_selection_message() {
        let mut out = Vec::new();
        run_lines(session(), None, "filter 99 Mg\n".as_bytes(), &mut out).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("No data available for this selection."));
    }
}
