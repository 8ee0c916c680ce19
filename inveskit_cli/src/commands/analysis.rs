//! The `analysis-request` subcommand: prints the backend analysis payload.

use anyhow::{anyhow, Result};
use clap::Args;
use inveskit_lib::{build_analysis_request, AnalysisStrategy};
use std::path::PathBuf;

use crate::input::{load_prices, load_trades};
use crate::output::print_json;

/// Arguments for the `analysis-request` subcommand.
///
/// Output is always JSON regardless of `--output`.
#[derive(Args)]
pub struct AnalysisArgs {
    /// Trade file (.json or .csv)
    #[arg(long)]
    pub trades: PathBuf,

    /// Daily price file (.json or .csv)
    #[arg(long)]
    pub prices: PathBuf,

    /// Strategy: bollinger, trend, external
    #[arg(long, default_value = "bollinger")]
    pub strategy: String,

    /// Source URL for the external strategy
    #[arg(long)]
    pub external_url: Option<String>,
}

pub fn run(args: &AnalysisArgs) -> Result<()> {
    let strategy: AnalysisStrategy = args.strategy.parse().map_err(|e: String| anyhow!(e))?;
    let trades = load_trades(&args.trades)?;
    let prices = load_prices(&args.prices)?;

    let request =
        build_analysis_request(&trades, &prices, strategy, args.external_url.as_deref())?;
    print_json(&request);

    Ok(())
}
