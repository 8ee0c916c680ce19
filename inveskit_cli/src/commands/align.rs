//! The `align` subcommand: joins trades onto a daily price series.

use anyhow::Result;
use clap::Args;
use inveskit_lib::{align, chart_target, trades_for_stock};
use std::path::PathBuf;

use crate::input::{load_prices, load_trades};
use crate::output::{
    print_json, print_series_csv, print_series_markdown, print_series_table, print_series_xml,
    OutputFormat,
};

/// Arguments for the `align` subcommand.
///
/// Price files must already be in chronological order.
#[derive(Args)]
pub struct AlignArgs {
    /// Trade file (.json or .csv)
    #[arg(long)]
    pub trades: PathBuf,

    /// Daily price file (.json or .csv)
    #[arg(long)]
    pub prices: PathBuf,

    /// Only align trades for this stock name
    #[arg(long)]
    pub stock: Option<String>,

    /// Drop price points outside the chart window of the trades
    #[arg(long)]
    pub window: bool,
}

pub fn run(args: &AlignArgs, format: &OutputFormat) -> Result<()> {
    let mut trades = load_trades(&args.trades)?;
    let mut prices = load_prices(&args.prices)?;

    if let Some(stock) = args.stock.as_deref() {
        trades = trades_for_stock(&trades, stock.trim());
    }

    if args.window {
        if let Some(target) = chart_target(&trades) {
            prices = target.window_prices(&prices);
        }
    }

    let series = align(&prices, &trades)?;

    eprintln!(
        "{} price points, {} trades matched, {} unmatched",
        series.points.len(),
        series.matched_count(),
        series.unmatched_count()
    );

    match format {
        OutputFormat::Table => print_series_table(&series),
        OutputFormat::Json => print_json(&series),
        OutputFormat::Csv => print_series_csv(&series)?,
        OutputFormat::Markdown => print_series_markdown(&series),
        OutputFormat::Xml => print_series_xml(&series)?,
    }

    Ok(())
}
