//! The `chart-target` subcommand: which stock and window to chart.

use anyhow::Result;
use clap::Args;
use inveskit_lib::chart_target;
use std::path::PathBuf;

use crate::input::load_trades;
use crate::output::{
    print_json, print_target_csv, print_target_markdown, print_target_table, print_target_xml,
    OutputFormat,
};

#[derive(Args)]
pub struct ChartTargetArgs {
    /// Trade file (.json or .csv)
    #[arg(long)]
    pub trades: PathBuf,
}

pub fn run(args: &ChartTargetArgs, format: &OutputFormat) -> Result<()> {
    let trades = load_trades(&args.trades)?;

    let Some(target) = chart_target(&trades) else {
        eprintln!("No trades in {}; nothing to chart", args.trades.display());
        return Ok(());
    };

    match format {
        OutputFormat::Table => print_target_table(&target),
        OutputFormat::Json => print_json(&target),
        OutputFormat::Csv => print_target_csv(&target)?,
        OutputFormat::Markdown => print_target_markdown(&target),
        OutputFormat::Xml => print_target_xml(&target)?,
    }

    Ok(())
}
