//! Error types for the engine.

use chrono::NaiveDate;
use inveskit_types::TradeId;

/// Errors produced by the aggregation and alignment engine.
///
/// A zero denominator in a ratio is never an error; those ratios are
/// defined as zero (see [`crate::summary`]).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A trade violates `quantity > 0`, `price >= 0` or has no stock name.
    #[error("Invalid trade {id}: {reason}")]
    InvalidTrade { id: TradeId, reason: String },

    /// Price point dates go backwards somewhere in the series.
    #[error("Price series is not chronological at index {index}: {current} follows {previous}")]
    UnsortedPriceSeries {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    /// Checked decimal arithmetic overflowed.
    #[error("Arithmetic overflow while computing {context}")]
    Overflow { context: &'static str },

    /// The external analysis strategy was requested without a source URL.
    #[error("External analysis strategy requires an external URL")]
    MissingExternalUrl,

    /// An analysis request needs at least one trade.
    #[error("No trades to analyze")]
    EmptyTradeList,
}

impl EngineError {
    pub(crate) fn invalid_trade(id: TradeId, reason: impl Into<String>) -> Self {
        Self::InvalidTrade {
            id,
            reason: reason.into(),
        }
    }
}
