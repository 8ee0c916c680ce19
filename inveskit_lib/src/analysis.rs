//! Request payload for the external trading-analysis backend.
//!
//! The backend (strategy evaluation, indicators, generated commentary) is
//! out of process and its response is opaque here. This module only
//! assembles and checks the request it expects.

use chrono::NaiveDate;
use inveskit_types::{PricePoint, Trade, TradeType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::validation::{check_chronological, validate_trades};

/// Analysis strategy understood by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStrategy {
    #[default]
    Bollinger,
    Trend,
    /// Strategy extracted from an external source such as a video URL.
    External,
}

impl std::fmt::Display for AnalysisStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AnalysisStrategy::Bollinger => "bollinger",
                AnalysisStrategy::Trend => "trend",
                AnalysisStrategy::External => "external",
            }
        )
    }
}

impl std::str::FromStr for AnalysisStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bollinger" => Ok(AnalysisStrategy::Bollinger),
            "trend" => Ok(AnalysisStrategy::Trend),
            "external" => Ok(AnalysisStrategy::External),
            other => Err(format!(
                "unknown strategy '{}'. Valid values: bollinger, trend, external",
                other
            )),
        }
    }
}

/// A trade as the backend expects it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeItem {
    pub stock_name: String,
    /// The journal has no separate instrument code; the name is sent.
    pub stock_code: String,
    pub trade_type: TradeType,
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i64,
}

impl From<&Trade> for TradeItem {
    fn from(trade: &Trade) -> Self {
        Self {
            stock_name: trade.stock_name.clone(),
            stock_code: trade.stock_name.clone(),
            trade_type: trade.trade_type,
            date: trade.date,
            price: trade.price,
            quantity: trade.quantity,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockPriceItem {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub close_price: Decimal,
}

impl From<&PricePoint> for StockPriceItem {
    fn from(point: &PricePoint) -> Self {
        Self {
            date: point.date,
            close_price: point.close,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub trades: Vec<TradeItem>,
    pub stock_prices: Vec<StockPriceItem>,
    pub strategy: AnalysisStrategy,
    pub external_url: Option<String>,
}

/// Build the backend request for `trades` against `prices`.
///
/// `external_url` is required (and trimmed) for [`AnalysisStrategy::External`]
/// and dropped for the other strategies.
pub fn build_analysis_request(
    trades: &[Trade],
    prices: &[PricePoint],
    strategy: AnalysisStrategy,
    external_url: Option<&str>,
) -> Result<AnalysisRequest, EngineError> {
    if trades.is_empty() {
        return Err(EngineError::EmptyTradeList);
    }
    validate_trades(trades)?;
    check_chronological(prices)?;

    let external_url = match strategy {
        AnalysisStrategy::External => {
            let url = external_url
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .ok_or(EngineError::MissingExternalUrl)?;
            Some(url.to_string())
        }
        AnalysisStrategy::Bollinger | AnalysisStrategy::Trend => None,
    };

    debug!(
        trades = trades.len(),
        prices = prices.len(),
        %strategy,
        "Built analysis request"
    );

    Ok(AnalysisRequest {
        trades: trades.iter().map(TradeItem::from).collect(),
        stock_prices: prices.iter().map(StockPriceItem::from).collect(),
        strategy,
        external_url,
    })
}
