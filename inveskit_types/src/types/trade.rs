//! Trade records as stored by the trade store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier assigned to a trade by the trade store.
pub type TradeId = i64;

/// A single buy or sell execution.
///
/// `quantity` is signed so that a bad record coming from the store can still
/// be represented and reported, instead of failing deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,

    /// Display name of the instrument; also the grouping key.
    pub stock_name: String,

    pub trade_type: TradeType,

    pub date: NaiveDate,

    /// Unit price at execution.
    pub price: Decimal,

    pub quantity: i64,
}

impl Trade {
    /// `price * quantity`, or `None` if the product overflows.
    pub fn gross_value(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TradeType::Buy => "buy",
                TradeType::Sell => "sell",
            }
        )
    }
}

impl std::str::FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(TradeType::Buy),
            "sell" => Ok(TradeType::Sell),
            other => Err(format!("unknown trade type '{}'", other)),
        }
    }
}
