mod commands;
mod input;
mod output;
mod xml_output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "inveskit")]
#[command(about = "Summarize a trade journal and align it with daily prices")]
struct Cli {
    /// Output format: table, json, csv, markdown, xml
    #[arg(long, env = "INVESKIT_OUTPUT", default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals, profit/loss and per-stock trade counts
    Summary(commands::summary::SummaryArgs),
    /// Attach trades to the price points of their dates
    Align(commands::align::AlignArgs),
    /// Stock and date window the price chart should show
    ChartTarget(commands::chart::ChartTargetArgs),
    /// Print the request payload for the analysis backend
    AnalysisRequest(commands::analysis::AnalysisArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let directive: Directive = "inveskit=info"
        .parse()
        .context("invalid default log directive")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    match &cli.command {
        Commands::Summary(args) => commands::summary::run(args, &format)?,
        Commands::Align(args) => commands::align::run(args, &format)?,
        Commands::ChartTarget(args) => commands::chart::run(args, &format)?,
        Commands::AnalysisRequest(args) => commands::analysis::run(args)?,
    }

    Ok(())
}
