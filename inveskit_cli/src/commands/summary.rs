//! The `summary` subcommand: aggregate metrics for a trade file.

use anyhow::Result;
use clap::Args;
use inveskit_lib::{summarize_with, SummaryOptions, DEFAULT_TOP_N};
use std::path::PathBuf;

use crate::input::load_trades;
use crate::output::{
    print_json, print_summary_csv, print_summary_markdown, print_summary_table,
    print_summary_xml, OutputFormat,
};

/// Arguments for the `summary` subcommand.
#[derive(Args)]
pub struct SummaryArgs {
    /// Trade file (.json or .csv)
    #[arg(long)]
    pub trades: PathBuf,

    /// Number of most-traded stocks to rank
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
}

pub fn run(args: &SummaryArgs, format: &OutputFormat) -> Result<()> {
    let trades = load_trades(&args.trades)?;
    let summary = summarize_with(&trades, &SummaryOptions { top_n: args.top })?;

    if summary.trade_count == 0 {
        eprintln!("No trades in {}", args.trades.display());
    }

    match format {
        OutputFormat::Table => print_summary_table(&summary),
        OutputFormat::Json => print_json(&summary),
        OutputFormat::Csv => print_summary_csv(&summary)?,
        OutputFormat::Markdown => print_summary_markdown(&summary),
        OutputFormat::Xml => print_summary_xml(&summary)?,
    }

    Ok(())
}
