//! Portfolio aggregation and trade/price alignment for the Inveskit journal.
//!
//! Everything here is a pure function over an in-memory snapshot: no I/O,
//! no shared state, safe to call from any number of threads at once.

pub mod align;
pub mod analysis;
pub mod chart;
pub mod error;
pub mod summary;
pub mod validation;

pub use inveskit_types;
pub use inveskit_types::types;
pub use inveskit_types::{PricePoint, PriceResponse, Response, Trade, TradeId, TradeType};

pub use align::{align, AlignedPoint, AlignedSeries, TradeMarker};
pub use analysis::{build_analysis_request, AnalysisRequest, AnalysisStrategy};
pub use chart::{chart_target, trades_for_stock, ChartTarget, DEFAULT_LOOKBACK_DAYS};
pub use error::EngineError;
pub use summary::{
    summarize, summarize_with, DistributionSlice, PortfolioSummary, RankedStock, StockStats,
    SummaryOptions, DEFAULT_TOP_N,
};
