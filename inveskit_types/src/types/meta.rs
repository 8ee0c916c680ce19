use serde::{Deserialize, Serialize};

use super::PricePoint;

/// Envelope used by the trade store for list responses.
#[derive(Serialize, Deserialize)]
pub struct Response<T> {
    pub data: T,
}

/// Envelope returned by the price source for a stock's price window.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    #[serde(default)]
    pub stock_name: Option<String>,

    pub prices: Vec<PricePoint>,
}
