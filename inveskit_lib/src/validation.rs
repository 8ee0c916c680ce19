//! Precondition checks for trades and price series.
//!
//! The engine rejects the whole call on the first violation instead of
//! skipping bad records, so the same input always gives the same output.

use std::str::FromStr;

use chrono::NaiveDate;
use inveskit_types::{PricePoint, Trade, TradeId, TradeType};
use rust_decimal::Decimal;

use crate::error::EngineError;

pub const MAX_STOCK_NAME_LENGTH: usize = 100;

/// Check a single trade against `quantity > 0`, `price >= 0` and a
/// non-empty stock name.
pub fn validate_trade(trade: &Trade) -> Result<(), EngineError> {
    if trade.stock_name.trim().is_empty() {
        return Err(EngineError::invalid_trade(trade.id, "stock name is empty"));
    }
    if trade.quantity <= 0 {
        return Err(EngineError::invalid_trade(
            trade.id,
            format!("quantity must be positive, got {}", trade.quantity),
        ));
    }
    if trade.price.is_sign_negative() && !trade.price.is_zero() {
        return Err(EngineError::invalid_trade(
            trade.id,
            format!("price must not be negative, got {}", trade.price),
        ));
    }
    Ok(())
}

/// Validate every trade, failing on the first offending record.
pub fn validate_trades(trades: &[Trade]) -> Result<(), EngineError> {
    trades.iter().try_for_each(validate_trade)
}

/// Require price point dates to be monotonically non-decreasing.
///
/// Out-of-order input is reported, never re-sorted.
pub fn check_chronological(prices: &[PricePoint]) -> Result<(), EngineError> {
    for (index, pair) in prices.windows(2).enumerate() {
        if pair[1].date < pair[0].date {
            return Err(EngineError::UnsortedPriceSeries {
                index: index + 1,
                previous: pair[0].date,
                current: pair[1].date,
            });
        }
    }
    Ok(())
}

/// Parse a textual price into an exact decimal.
///
/// `NaN`, infinities, exponent forms that overflow and negative values are
/// rejected as [`EngineError::InvalidTrade`] for trade `id`.
pub fn parse_price(id: TradeId, input: &str) -> Result<Decimal, EngineError> {
    let trimmed = input.trim();
    let price = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| EngineError::invalid_trade(id, format!("price '{}' is not a finite number", trimmed)))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(EngineError::invalid_trade(
            id,
            format!("price must not be negative, got {}", price),
        ));
    }
    Ok(price)
}

/// Parse a trade type, accepting `buy`/`sell` in any case.
pub fn parse_trade_type(id: TradeId, input: &str) -> Result<TradeType, EngineError> {
    TradeType::from_str(input).map_err(|reason| EngineError::invalid_trade(id, reason))
}

/// Validate a YYYY-MM-DD date string.
pub fn parse_trade_date(id: TradeId, input: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_trade(
            id,
            format!(
                "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
                trimmed
            ),
        )
    })
}

/// Trim a stock name and enforce a length limit.
pub fn normalize_stock_name(id: TradeId, input: &str) -> Result<String, EngineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_trade(id, "stock name is empty"));
    }
    if trimmed.chars().count() > MAX_STOCK_NAME_LENGTH {
        return Err(EngineError::invalid_trade(
            id,
            format!(
                "stock name exceeds maximum length of {} characters",
                MAX_STOCK_NAME_LENGTH
            ),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
