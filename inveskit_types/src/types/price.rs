use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily bar of a price series.
///
/// Only `close` is used by the engine; `open`, `high` and `low` are carried
/// through untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,

    #[serde(alias = "closePrice")]
    pub close: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "openPrice")]
    pub open: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "highPrice")]
    pub high: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "lowPrice")]
    pub low: Option<Decimal>,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self {
            date,
            close,
            open: None,
            high: None,
            low: None,
        }
    }
}
