use anyhow::Result;
use inveskit_lib::{AlignedSeries, ChartTarget, PortfolioSummary, Trade};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::xml_output;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
    Xml,
}

impl OutputFormat {
    /// Unknown names fall back to a table.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            "xml" => OutputFormat::Xml,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    #[serde(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct StockRow {
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Buys")]
    #[serde(rename = "Buys")]
    buys: usize,
    #[tabled(rename = "Sells")]
    #[serde(rename = "Sells")]
    sells: usize,
    #[tabled(rename = "Trades")]
    #[serde(rename = "Trades")]
    trades: usize,
    #[tabled(rename = "Share")]
    #[serde(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize)]
struct RankRow {
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Trades")]
    #[serde(rename = "Trades")]
    trades: usize,
}

#[derive(Tabled, Serialize)]
struct PointRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Close")]
    #[serde(rename = "Close")]
    close: String,
    #[tabled(rename = "Trades")]
    #[serde(rename = "Trades")]
    trades: String,
}

#[derive(Tabled, Serialize)]
struct UnmatchedRow {
    #[tabled(rename = "Id")]
    #[serde(rename = "Id")]
    id: i64,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Trade")]
    #[serde(rename = "Trade")]
    trade: String,
}

/// One CSV line of an aligned series: a price point or an unmatched trade.
#[derive(Serialize)]
struct SeriesCsvRow {
    #[serde(rename = "Kind")]
    kind: &'static str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Close")]
    close: String,
    #[serde(rename = "Trades")]
    trades: String,
}

#[derive(Tabled, Serialize)]
struct TargetRow {
    #[tabled(rename = "Stock")]
    #[serde(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Start")]
    #[serde(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    #[serde(rename = "End")]
    end: String,
    #[tabled(rename = "Days")]
    #[serde(rename = "Days")]
    days: u32,
}

// -- Row builders --

fn build_metric_rows(summary: &PortfolioSummary) -> Vec<MetricRow> {
    let row = |metric: &str, value: String| MetricRow {
        metric: metric.to_string(),
        value,
    };
    vec![
        row("Total investment", format_amount(summary.total_investment)),
        row("Total sales", format_amount(summary.total_sales)),
        row("Profit/loss", format_profit_loss(summary)),
        row("Profit rate", format_percent(summary.profit_rate_percent)),
        row(
            "Trades",
            format!(
                "{} ({} buy / {} sell)",
                summary.trade_count, summary.buy_count, summary.sell_count
            ),
        ),
        row(
            "Average trade value",
            format_amount(summary.average_trade_value),
        ),
    ]
}

fn build_stock_rows(summary: &PortfolioSummary) -> Vec<StockRow> {
    let total = summary.distribution_total();
    summary
        .distribution
        .iter()
        .map(|slice| {
            let stats = summary
                .per_stock
                .get(&slice.stock_name)
                .copied()
                .unwrap_or_default();
            StockRow {
                stock: slice.stock_name.clone(),
                buys: stats.buy_count,
                sells: stats.sell_count,
                trades: slice.total_count,
                share: format!("{:.1}%", slice.share_of(total) * 100.0),
            }
        })
        .collect()
}

fn build_rank_rows(summary: &PortfolioSummary) -> Vec<RankRow> {
    summary
        .top_stocks
        .iter()
        .enumerate()
        .map(|(i, ranked)| RankRow {
            rank: i + 1,
            stock: ranked.stock_name.clone(),
            trades: ranked.stats.total_count,
        })
        .collect()
}

fn build_point_rows(series: &AlignedSeries) -> Vec<PointRow> {
    series
        .points
        .iter()
        .map(|point| PointRow {
            date: point.price_point.date.to_string(),
            close: format_amount(point.price_point.close),
            trades: point
                .trades
                .iter()
                .map(describe_trade)
                .collect::<Vec<_>>()
                .join("; "),
        })
        .collect()
}

fn build_unmatched_rows(series: &AlignedSeries) -> Vec<UnmatchedRow> {
    series
        .unmatched_trades
        .iter()
        .map(|t| UnmatchedRow {
            id: t.id,
            date: t.date.to_string(),
            stock: t.stock_name.clone(),
            trade: describe_trade(t),
        })
        .collect()
}

fn build_series_csv_rows(series: &AlignedSeries) -> Vec<SeriesCsvRow> {
    let points = build_point_rows(series).into_iter().map(|row| SeriesCsvRow {
        kind: "point",
        date: row.date,
        close: row.close,
        trades: row.trades,
    });
    let unmatched = series.unmatched_trades.iter().map(|t| SeriesCsvRow {
        kind: "unmatched",
        date: t.date.to_string(),
        close: String::new(),
        trades: format!("#{} {} {}", t.id, t.stock_name, describe_trade(t)),
    });
    points.chain(unmatched).collect()
}

fn build_target_rows(target: &ChartTarget) -> Vec<TargetRow> {
    vec![TargetRow {
        stock: target.stock_name.clone(),
        start: target.start_date().to_string(),
        end: target.end_date.to_string(),
        days: target.lookback_days,
    }]
}

/// e.g. `buy 10 @ 70,000`
fn describe_trade(trade: &Trade) -> String {
    format!(
        "{} {} @ {}",
        trade.trade_type,
        trade.quantity,
        format_amount(trade.price)
    )
}

// -- Summary output --

pub fn print_summary_table(summary: &PortfolioSummary) {
    print_summary_tables(summary, false);
}

pub fn print_summary_markdown(summary: &PortfolioSummary) {
    print_summary_tables(summary, true);
}

fn print_summary_tables(summary: &PortfolioSummary, markdown: bool) {
    let mut tables = vec![
        Table::new(build_metric_rows(summary)),
        Table::new(build_stock_rows(summary)),
    ];
    if !summary.top_stocks.is_empty() {
        tables.push(Table::new(build_rank_rows(summary)));
    }
    for mut table in tables {
        if markdown {
            table.with(Style::markdown());
        }
        println!("{}\n", table);
    }
}

/// CSV carries the per-stock breakdown; totals are in the table/JSON views.
pub fn print_summary_csv(summary: &PortfolioSummary) -> Result<()> {
    write_csv(build_stock_rows(summary))
}

pub fn print_summary_xml(summary: &PortfolioSummary) -> Result<()> {
    println!("{}", xml_output::summary_to_xml(summary)?);
    Ok(())
}

// -- Aligned series output --

pub fn print_series_table(series: &AlignedSeries) {
    println!("{}", Table::new(build_point_rows(series)));
    if !series.unmatched_trades.is_empty() {
        eprintln!("\nTrades without a price point on their date:");
        eprintln!("{}", Table::new(build_unmatched_rows(series)));
    }
}

pub fn print_series_markdown(series: &AlignedSeries) {
    let mut table = Table::new(build_point_rows(series));
    table.with(Style::markdown());
    println!("{}", table);
    if !series.unmatched_trades.is_empty() {
        let mut unmatched = Table::new(build_unmatched_rows(series));
        unmatched.with(Style::markdown());
        eprintln!("\nTrades without a price point on their date:");
        eprintln!("{}", unmatched);
    }
}

/// Unmatched trades follow the price points so none is lost.
pub fn print_series_csv(series: &AlignedSeries) -> Result<()> {
    write_csv(build_series_csv_rows(series))
}

pub fn print_series_xml(series: &AlignedSeries) -> Result<()> {
    println!("{}", xml_output::series_to_xml(series)?);
    Ok(())
}

// -- Chart target output --

pub fn print_target_table(target: &ChartTarget) {
    println!("{}", Table::new(build_target_rows(target)));
}

pub fn print_target_markdown(target: &ChartTarget) {
    let mut table = Table::new(build_target_rows(target));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_target_csv(target: &ChartTarget) -> Result<()> {
    write_csv(build_target_rows(target))
}

pub fn print_target_xml(target: &ChartTarget) -> Result<()> {
    println!("{}", xml_output::chart_target_to_xml(target)?);
    Ok(())
}

// -- CSV / JSON --

fn write_csv<T: Serialize>(rows: Vec<T>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Formatting --

/// Thousands-separated amount, keeping every significant fraction digit.
fn format_amount(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn format_profit_loss(summary: &PortfolioSummary) -> String {
    if summary.is_profitable() {
        format!("+{}", format_amount(summary.profit_loss))
    } else {
        format_amount(summary.profit_loss)
    }
}

/// Rounded to two places for display only.
fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    if rounded > Decimal::ZERO {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
