//! Mock Market Data Client
//!
//! For testing and demo purposes. Serves deterministic daily series.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use super::MarketDataClient;
use crate::error::Result;
use crate::model::{Feed, Market, MarketId, MetricSample};

/// Days of history generated per seeded series
const SEEDED_DAYS: u64 = 30;

/// Mock client backed by in-memory series
pub struct MockMarketDataClient {
    series: HashMap<(MarketId, Feed), Vec<MetricSample>>,
}

impl Default for MockMarketDataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketDataClient {
    /// Mock seeded with a month of data for every supported market
    pub fn new() -> Self {
        let mut client = Self::empty();
        for market in Market::ALL {
            for feed in [Feed::PriceFeed, Feed::RentalPriceFeed, Feed::Volatility, Feed::ForSaleInventory] {
                client.series.insert((market.id(), feed), seeded_series(market, feed));
            }
        }
        client
    }

    /// Mock with no data at all
    pub fn empty() -> Self {
        Self {
            series: HashMap::new(),
        }
    }

    /// Replace one series (values newest first)
    pub fn with_series(mut self, market: MarketId, feed: Feed, values: impl IntoIterator<Item = f64>) -> Self {
        let samples = values.into_iter().map(MetricSample::new).collect();
        self.series.insert((market, feed), samples);
        self
    }
}

/// (price/sqft, rent/sqft, volatility %, listings)
fn base_values(market: Market) -> (f64, f64, f64, f64) {
    match market {
        Market::NewYorkCity => (561.0, 3.42, 0.41, 27_800.0),
        Market::LosAngeles => (642.0, 3.05, 0.37, 11_900.0),
        Market::Chicago => (243.0, 1.93, 0.52, 8_400.0),
        Market::Houston => (157.0, 1.31, 0.48, 14_600.0),
        Market::Philadelphia => (205.0, 1.72, 0.55, 5_300.0),
        Market::Austin => (331.0, 1.84, 0.63, 6_200.0),
        Market::SanFrancisco => (905.0, 4.11, 0.44, 2_100.0),
    }
}

fn seeded_series(market: Market, feed: Feed) -> Vec<MetricSample> {
    let (price, rent, volatility, inventory) = base_values(market);
    let base = match feed {
        Feed::PriceFeed => price,
        Feed::RentalPriceFeed => rent,
        Feed::Volatility => volatility,
        Feed::ForSaleInventory => inventory,
    };
    let newest = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default();

    (0..SEEDED_DAYS)
        .map(|day| {
            // Small repeating wobble so averages differ from the latest value.
            let wobble = 1.0 + 0.002 * ((day % 7) as f64 - 3.0);
            let mut value = base * wobble;
            if feed == Feed::ForSaleInventory {
                value = value.round();
            }
            let date = newest.checked_sub_days(Days::new(day)).unwrap_or(newest);
            MetricSample::dated(date, value)
        })
        .collect()
}

#[async_trait]
impl MarketDataClient for MockMarketDataClient {
    async fn fetch_series(&self, market: MarketId, feed: Feed, limit: usize) -> Result<Vec<MetricSample>> {
        Ok(self
            .series
            .get(&(market, feed))
            .map(|samples| samples.iter().take(limit).copied().collect())
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "MockMarketData"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_series_respects_limit() {
        let client = MockMarketDataClient::new();
        let samples = client.fetch_series(Market::Austin.id(), Feed::Volatility, 10).await.unwrap();
        assert_eq!(samples.len(), 10);
        assert!(samples[0].date > samples[1].date);
    }

    #[tokio::test]
    async fn test_injected_series() {
        let client = MockMarketDataClient::empty()
            .with_series(Market::Austin.id(), Feed::PriceFeed, [412.5, 410.0]);

        let samples = client.fetch_series(Market::Austin.id(), Feed::PriceFeed, 1).await.unwrap();
        assert_eq!(samples, vec![MetricSample::new(412.5)]);

        let missing = client.fetch_series(Market::Chicago.id(), Feed::PriceFeed, 1).await.unwrap();
        assert!(missing.is_empty());
    }
}
