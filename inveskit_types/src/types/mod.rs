mod meta;
pub use self::meta::{PriceResponse, Response};

mod trade;
pub use self::trade::{Trade, TradeId, TradeType};

mod price;
pub use self::price::PricePoint;
