//! Loading trade and price snapshots from JSON or CSV files.

use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use inveskit_lib::validation::{normalize_stock_name, parse_price, parse_trade_date, parse_trade_type};
use inveskit_lib::{PricePoint, PriceResponse, Response, Trade};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

/// Trade JSON: a bare array or the `{"data": [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum TradeDocument {
    Bare(Vec<Trade>),
    Wrapped(Response<Vec<Trade>>),
}

/// Price JSON: a bare array or the `{"prices": [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceDocument {
    Bare(Vec<PricePoint>),
    Wrapped(PriceResponse),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TradeRow {
    id: i64,
    stock_name: String,
    trade_type: String,
    date: String,
    price: String,
    quantity: i64,
}

impl TradeRow {
    fn into_trade(self) -> Result<Trade, inveskit_lib::EngineError> {
        Ok(Trade {
            id: self.id,
            stock_name: normalize_stock_name(self.id, &self.stock_name)?,
            trade_type: parse_trade_type(self.id, &self.trade_type)?,
            date: parse_trade_date(self.id, &self.date)?,
            price: parse_price(self.id, &self.price)?,
            quantity: self.quantity,
        })
    }
}

#[derive(Deserialize)]
struct PriceRow {
    date: String,
    close: String,
    #[serde(default)]
    open: Option<String>,
    #[serde(default)]
    high: Option<String>,
    #[serde(default)]
    low: Option<String>,
}

impl PriceRow {
    fn into_point(self, line: usize) -> Result<PricePoint> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .with_context(|| format!("row {}: invalid date '{}'", line, self.date))?;
        Ok(PricePoint {
            date,
            close: parse_decimal(line, "close", &self.close)?,
            open: parse_optional(line, "open", self.open.as_deref())?,
            high: parse_optional(line, "high", self.high.as_deref())?,
            low: parse_optional(line, "low", self.low.as_deref())?,
        })
    }
}

fn parse_decimal(line: usize, column: &str, text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .with_context(|| format!("row {}: {} '{}' is not a finite number", line, column, trimmed))
}

/// Empty cells count as missing.
fn parse_optional(line: usize, column: &str, text: Option<&str>) -> Result<Option<Decimal>> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_decimal(line, column, value).map(Some),
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_trades(path: &Path) -> Result<Vec<Trade>> {
    let text = read_file(path)?;
    let trades = if is_csv(path) {
        parse_trades_csv(&text)
    } else {
        parse_trades_json(&text)
    }
    .with_context(|| format!("failed to load trades from {}", path.display()))?;
    debug!(path = %path.display(), count = trades.len(), "Loaded trades");
    Ok(trades)
}

pub fn load_prices(path: &Path) -> Result<Vec<PricePoint>> {
    let text = read_file(path)?;
    let prices = if is_csv(path) {
        parse_prices_csv(&text)
    } else {
        parse_prices_json(&text)
    }
    .with_context(|| format!("failed to load prices from {}", path.display()))?;
    debug!(path = %path.display(), count = prices.len(), "Loaded prices");
    Ok(prices)
}

pub fn parse_trades_json(text: &str) -> Result<Vec<Trade>> {
    let doc: TradeDocument = serde_json::from_str(text)
        .context("expected a trade array or an object with a \"data\" array")?;
    Ok(match doc {
        TradeDocument::Bare(trades) => trades,
        TradeDocument::Wrapped(resp) => resp.data,
    })
}

pub fn parse_trades_csv(text: &str) -> Result<Vec<Trade>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut trades = Vec::new();
    for (i, row) in reader.deserialize::<TradeRow>().enumerate() {
        // header is line 1
        let row = row.with_context(|| format!("malformed trade row {}", i + 2))?;
        trades.push(row.into_trade()?);
    }
    Ok(trades)
}

pub fn parse_prices_json(text: &str) -> Result<Vec<PricePoint>> {
    let doc: PriceDocument = serde_json::from_str(text)
        .context("expected a price array or an object with a \"prices\" array")?;
    Ok(match doc {
        PriceDocument::Bare(prices) => prices,
        PriceDocument::Wrapped(resp) => resp.prices,
    })
}

pub fn parse_prices_csv(text: &str) -> Result<Vec<PricePoint>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().context("missing CSV header")?;
    if !headers.iter().any(|h| h == "date") || !headers.iter().any(|h| h == "close") {
        bail!("price CSV needs at least 'date' and 'close' columns");
    }
    let mut prices = Vec::new();
    for (i, row) in reader.deserialize::<PriceRow>().enumerate() {
        let line = i + 2;
        let row = row.with_context(|| format!("malformed price row {}", line))?;
        prices.push(row.into_point(line)?);
    }
    Ok(prices)
}
