//! Data types exchanged with the trade store and the price source.
//!
//! These are the records the engine in `inveskit_lib` consumes. They carry
//! no behaviour beyond serde mapping and a few accessors.

pub mod types;

pub use self::types::{PricePoint, PriceResponse, Response, Trade, TradeId, TradeType};
