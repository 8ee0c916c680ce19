//! Portfolio summary: totals, profit metrics and per-stock rankings.
//!
//! [`summarize`] is a pure reducer over a trade snapshot. Callers recompute
//! the summary whenever their trade list changes; nothing is cached.
//!
//! Two ratios have a zero denominator policy instead of an error:
//! - `profit_rate_percent` is `0` when nothing was bought
//! - `average_trade_value` is `0` when there are no trades

use indexmap::IndexMap;
use inveskit_types::{Trade, TradeType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::validation::validate_trades;

/// Number of stocks kept in [`PortfolioSummary::top_stocks`] by default.
pub const DEFAULT_TOP_N: usize = 5;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Tunables for [`summarize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Maximum length of the top-stock ranking.
    pub top_n: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Trade counts for one stock.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockStats {
    pub buy_count: usize,
    pub sell_count: usize,
    pub total_count: usize,
}

/// An entry of the top-stock ranking.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankedStock {
    pub stock_name: String,
    #[serde(flatten)]
    pub stats: StockStats,
}

/// One slice of the trade-count distribution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    pub stock_name: String,
    pub total_count: usize,
}

impl DistributionSlice {
    /// Fraction of `total` this slice represents, for pie rendering.
    /// Returns `0.0` when `total` is zero.
    pub fn share_of(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.total_count as f64 / total as f64
    }
}

/// Aggregate metrics derived from a trade list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sum of `price * quantity` over buys.
    pub total_investment: Decimal,
    /// Sum of `price * quantity` over sells.
    pub total_sales: Decimal,
    /// `total_sales - total_investment`.
    pub profit_loss: Decimal,
    /// `profit_loss / total_investment * 100`, or `0` with no investment.
    pub profit_rate_percent: Decimal,
    /// Per-stock counts in first-seen order.
    pub per_stock: IndexMap<String, StockStats>,
    pub top_stocks: Vec<RankedStock>,
    pub distribution: Vec<DistributionSlice>,
    pub trade_count: usize,
    pub buy_count: usize,
    pub sell_count: usize,
    /// Mean `price * quantity` over all trades, or `0` with no trades.
    pub average_trade_value: Decimal,
}

impl PortfolioSummary {
    /// Sum of all distribution slices; equals `trade_count`.
    pub fn distribution_total(&self) -> usize {
        self.distribution.iter().map(|s| s.total_count).sum()
    }

    pub fn is_profitable(&self) -> bool {
        self.profit_loss > Decimal::ZERO
    }
}

/// Summarize `trades` with the default options.
pub fn summarize(trades: &[Trade]) -> Result<PortfolioSummary, EngineError> {
    summarize_with(trades, &SummaryOptions::default())
}

/// Summarize `trades`, keeping `options.top_n` stocks in the ranking.
///
/// Fails with [`EngineError::InvalidTrade`] on the first trade that breaks
/// `quantity > 0` / `price >= 0`, and with [`EngineError::Overflow`] if a
/// money total does not fit in a `Decimal`.
pub fn summarize_with(
    trades: &[Trade],
    options: &SummaryOptions,
) -> Result<PortfolioSummary, EngineError> {
    validate_trades(trades)?;

    let mut total_investment = Decimal::ZERO;
    let mut total_sales = Decimal::ZERO;
    let mut gross_value = Decimal::ZERO;
    let mut buy_count = 0;
    let mut sell_count = 0;
    let mut per_stock: IndexMap<String, StockStats> = IndexMap::new();

    for trade in trades {
        let value = trade.gross_value().ok_or(EngineError::Overflow {
            context: "trade value",
        })?;
        let stats = per_stock.entry(trade.stock_name.clone()).or_default();
        stats.total_count += 1;

        match trade.trade_type {
            TradeType::Buy => {
                total_investment = checked_add(total_investment, value, "total investment")?;
                buy_count += 1;
                stats.buy_count += 1;
            }
            TradeType::Sell => {
                total_sales = checked_add(total_sales, value, "total sales")?;
                sell_count += 1;
                stats.sell_count += 1;
            }
        }
        gross_value = checked_add(gross_value, value, "gross trade value")?;
    }

    let top_stocks = rank_stocks(&per_stock, options.top_n);
    let distribution = per_stock
        .iter()
        .map(|(name, stats)| DistributionSlice {
            stock_name: name.clone(),
            total_count: stats.total_count,
        })
        .collect();

    let profit_loss = total_sales
        .checked_sub(total_investment)
        .ok_or(EngineError::Overflow {
            context: "profit/loss",
        })?;
    let profit_rate_percent = profit_rate(profit_loss, total_investment)?;
    let trade_count = trades.len();
    let average_trade_value = average(gross_value, trade_count)?;

    debug!(
        trades = trade_count,
        stocks = per_stock.len(),
        %total_investment,
        %total_sales,
        "Summarized portfolio"
    );

    Ok(PortfolioSummary {
        total_investment,
        total_sales,
        profit_loss,
        profit_rate_percent,
        per_stock,
        top_stocks,
        distribution,
        trade_count,
        buy_count,
        sell_count,
        average_trade_value,
    })
}

/// Stocks sorted by total trade count descending, at most `limit` entries.
///
/// `Vec::sort_by` is stable, so stocks with equal counts keep their
/// first-seen order from `per_stock`.
pub fn rank_stocks(per_stock: &IndexMap<String, StockStats>, limit: usize) -> Vec<RankedStock> {
    let mut ranked: Vec<RankedStock> = per_stock
        .iter()
        .map(|(name, stats)| RankedStock {
            stock_name: name.clone(),
            stats: *stats,
        })
        .collect();
    ranked.sort_by(|a, b| b.stats.total_count.cmp(&a.stats.total_count));
    ranked.truncate(limit);
    ranked
}

/// `profit_loss * 100 / total_investment`, defined as zero without investment.
///
/// Scaling happens before the division so the quotient keeps every digit
/// `Decimal` can hold.
pub fn profit_rate(profit_loss: Decimal, total_investment: Decimal) -> Result<Decimal, EngineError> {
    if total_investment.is_zero() {
        return Ok(Decimal::ZERO);
    }
    profit_loss
        .checked_mul(ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total_investment))
        .ok_or(EngineError::Overflow {
            context: "profit rate",
        })
}

fn average(total: Decimal, count: usize) -> Result<Decimal, EngineError> {
    if count == 0 {
        return Ok(Decimal::ZERO);
    }
    total
        .checked_div(Decimal::from(count))
        .ok_or(EngineError::Overflow {
            context: "average trade value",
        })
}

fn checked_add(acc: Decimal, value: Decimal, context: &'static str) -> Result<Decimal, EngineError> {
    acc.checked_add(value)
        .ok_or(EngineError::Overflow { context })
}
