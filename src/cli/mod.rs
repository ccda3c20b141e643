use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use icp_explorer::export::ExportFormat;
use icp_explorer::identifier::SampleType;
use icp_explorer::series::ColorScheme;

mod export;
mod info;
mod list;
mod load;
mod session;
mod show;
mod source_arg;
mod summary;

pub use source_arg::SourceArg;

/// icp-explorer - normalize and explore ICP time series from shale incubations
#[derive(Parser)]
#[command(name = "icp-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Load sources and options from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Additional source, appended after the configured ones
    #[arg(short = 's', long = "source", value_name = "PATH[:LABEL[:MULT]]", global = true)]
    sources: Vec<SourceArg>,

    /// Do not derive O2/CO2 conditions
    #[arg(long, global = true)]
    no_conditions: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Export format argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// Comma-delimited text
    Csv,
    /// Apache Parquet
    Parquet,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Parquet => ExportFormat::Parquet,
        }
    }
}

/// Colour scheme argument.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum SchemeArg {
    /// One colour per treatment group
    #[default]
    Group,
    /// Red/blue by O2, solid/dashed by CO2
    Exposure,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Group => ColorScheme::ByGroup,
            SchemeArg::Exposure => ColorScheme::ByExposure,
        }
    }
}

/// Sample type argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SampleTypeArg {
    /// Intact disks
    Disk,
    /// Crushed dust
    Dust,
    /// Neither marker in the identifier
    Unknown,
}

impl From<SampleTypeArg> for SampleType {
    fn from(arg: SampleTypeArg) -> Self {
        match arg {
            SampleTypeArg::Disk => SampleType::Disk,
            SampleTypeArg::Dust => SampleType::Dust,
            SampleTypeArg::Unknown => SampleType::Unknown,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Load all sources and print per-source statistics
    Summary,

    /// List shale ids or the elements of one shale
    List {
        #[command(subcommand)]
        target: ListTarget,
    },

    /// Print the plot series of one shale and element
    Show {
        /// Shale id, e.g. 64 or 12-BIS
        #[arg(long)]
        shale: String,

        /// Element symbol, e.g. Mg
        #[arg(long)]
        element: String,

        /// Sample types to include (all when omitted)
        #[arg(short = 't', long = "type", value_enum)]
        types: Vec<SampleTypeArg>,

        /// Series colouring
        #[arg(long, default_value = "group", value_enum)]
        scheme: SchemeArg,
    },

    /// Write the normalized long table
    Export {
        /// Output file path
        #[arg(short, long, value_name = "FILE", default_value = "cleaned_icp_data.csv")]
        output: PathBuf,

        /// Output format (inferred from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Display the footer metadata and schema of a Parquet export
    Info {
        /// Parquet export path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Interactive session: filter, remove points, reset, export
    Session,
}

#[derive(Subcommand)]
enum ListTarget {
    /// Distinct shale ids
    Shales,
    /// Distinct elements of one shale
    Elements {
        /// Shale id
        #[arg(long)]
        shale: String,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    fn load_args(&self) -> load::LoadArgs<'_> {
        load::LoadArgs {
            config: self.config.as_deref(),
            sources: &self.sources,
            no_conditions: self.no_conditions,
        }
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let args = cli.load_args();
    match &cli.command {
        Commands::Summary => summary::run(&args),
        Commands::List { target } => match target {
            ListTarget::Shales => list::shales(&args),
            ListTarget::Elements { shale } => list::elements(&args, shale),
        },
        Commands::Show {
            shale,
            element,
            types,
            scheme,
        } => {
            let types: Vec<SampleType> = types.iter().copied().map(SampleType::from).collect();
            show::run(&args, shale, element, &types, ColorScheme::from(*scheme))
        }
        Commands::Export { output, format } => {
            export::run(&args, output, format.map(ExportFormat::from))
        }
        Commands::Info { file } => info::run(file),
        Commands::Session => session::run(&args),
    }
}

/// Section heading, styled when colour output is enabled
fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        console::style(text).bold().underlined().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

/// Dimmed text, e.g. the no-data message
fn muted(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        console::style(text).dim().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}
