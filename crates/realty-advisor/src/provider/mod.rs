//! Market Data Providers
//!
//! Abstractions and implementations for the upstream market data API.

mod http;
mod mock;

pub use http::{parse_feed_response, ParclLabsClient};
pub use mock::MockMarketDataClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Feed, MarketId, MetricSample};

/// Market data client trait (Strategy pattern)
///
/// Each call issues at most one upstream request.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Fetch up to `limit` samples of a feed, newest first
    async fn fetch_series(&self, market: MarketId, feed: Feed, limit: usize) -> Result<Vec<MetricSample>>;

    /// Provider name
    fn name(&self) -> &str;
}
