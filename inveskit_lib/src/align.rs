//! Joins trades onto a daily price series by calendar date.
//!
//! The price series is the fixed timeline: the engine does not know the
//! market calendar, so a trade dated on a day without a price point cannot
//! be plotted. Such trades come back in [`AlignedSeries::unmatched_trades`]
//! instead of being dropped or moved to a neighbouring day.

use std::collections::HashMap;

use chrono::NaiveDate;
use inveskit_types::{PricePoint, Trade, TradeId, TradeType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::validation::{check_chronological, validate_trades};

/// A price point together with the trades executed on its date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlignedPoint {
    pub price_point: PricePoint,
    pub trades: Vec<Trade>,
}

/// Result of [`align`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlignedSeries {
    /// One entry per input price point, in input order.
    pub points: Vec<AlignedPoint>,
    /// Trades whose date has no price point, in trade input order.
    pub unmatched_trades: Vec<Trade>,
}

/// A plottable trade annotation.
///
/// The marker sits at the trade's own execution price, not at the close.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TradeMarker {
    pub date: NaiveDate,
    pub trade_id: TradeId,
    pub trade_type: TradeType,
    pub price: Decimal,
    pub quantity: i64,
}

impl AlignedSeries {
    /// Number of trades attached to some price point.
    pub fn matched_count(&self) -> usize {
        self.points.iter().map(|p| p.trades.len()).sum()
    }

    pub fn unmatched_count(&self) -> usize {
        self.unmatched_trades.len()
    }

    /// Markers for every attached trade, in series order.
    pub fn markers(&self) -> Vec<TradeMarker> {
        self.points
            .iter()
            .flat_map(|point| {
                point.trades.iter().map(move |trade| TradeMarker {
                    date: point.price_point.date,
                    trade_id: trade.id,
                    trade_type: trade.trade_type,
                    price: trade.price,
                    quantity: trade.quantity,
                })
            })
            .collect()
    }
}

/// Attach each trade to the price point with the same date.
///
/// `prices` must already be chronological (non-decreasing dates); it is
/// checked, never re-sorted. When two price points share a date, the
/// trades go to the first of them only, so each trade appears exactly once
/// in the output.
pub fn align(prices: &[PricePoint], trades: &[Trade]) -> Result<AlignedSeries, EngineError> {
    validate_trades(trades)?;
    check_chronological(prices)?;

    let mut by_date: HashMap<NaiveDate, Vec<&Trade>> = HashMap::new();
    for trade in trades {
        by_date.entry(trade.date).or_default().push(trade);
    }

    let points: Vec<AlignedPoint> = prices
        .iter()
        .map(|price_point| AlignedPoint {
            price_point: price_point.clone(),
            trades: by_date
                .remove(&price_point.date)
                .unwrap_or_default()
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();

    // Whatever is left in the map had no price point. Walk the input again
    // to report those trades in input order.
    let unmatched_trades: Vec<Trade> = trades
        .iter()
        .filter(|trade| by_date.contains_key(&trade.date))
        .cloned()
        .collect();

    if !unmatched_trades.is_empty() {
        warn!(
            unmatched = unmatched_trades.len(),
            "Trades have no price point on their date"
        );
    }
    debug!(
        prices = prices.len(),
        trades = trades.len(),
        unmatched = unmatched_trades.len(),
        "Aligned trades onto price series"
    );

    Ok(AlignedSeries {
        points,
        unmatched_trades,
    })
}
