//! # icp-explorer
//!
//! Command-line host for the ICP normalization pipeline and session model.
//!
//! ## Usage
//!
//! ```bash
//! # Load three batches and summarize them
//! icp-explorer -s data/icpTotRaw.csv:Exp1 -s data/Exp2_TotICP.csv:Exp2:1000 \
//!     -s data/exBis12TotIcp.csv:BIS summary
//!
//! # Same sources from a config file
//! icp-explorer --config icp.toml show --shale 64 --element Mg --type disk
//!
//! # Write the cleaned long table
//! icp-explorer --config icp.toml export -o cleaned_icp_data.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
