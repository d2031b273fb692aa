//! Service Kit - Agent Tools
//!
//! Market data tools that implement `agent_core::Tool`.

mod envelope;
mod latest_feed;
mod volatility;

pub use envelope::{FeedReport, MarketContext, CALL_PRICE};
pub use latest_feed::LatestFeedTool;
pub use volatility::VolatilityTool;
