//! Domain Models
//!
//! Market identifiers, supported markets, feeds, and fetched samples.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque market identifier assigned by the data provider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(pub u64);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Markets with a known provider identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    NewYorkCity,
    LosAngeles,
    Chicago,
    Houston,
    Philadelphia,
    Austin,
    SanFrancisco,
}

impl Market {
    pub const ALL: [Market; 7] = [
        Market::NewYorkCity,
        Market::LosAngeles,
        Market::Chicago,
        Market::Houston,
        Market::Philadelphia,
        Market::Austin,
        Market::SanFrancisco,
    ];

    /// Display name, also the lookup key (case-insensitive)
    pub fn name(self) -> &'static str {
        match self {
            Market::NewYorkCity => "New York City",
            Market::LosAngeles => "Los Angeles",
            Market::Chicago => "Chicago",
            Market::Houston => "Houston",
            Market::Philadelphia => "Philadelphia",
            Market::Austin => "Austin",
            Market::SanFrancisco => "San Francisco",
        }
    }

    /// Provider market identifier (city-level market)
    pub fn id(self) -> MarketId {
        MarketId(match self {
            Market::NewYorkCity => 2_900_187,
            Market::LosAngeles => 2_900_078,
            Market::Chicago => 2_899_845,
            Market::Houston => 2_899_989,
            Market::Philadelphia => 2_900_280,
            Market::Austin => 2_900_049,
            Market::SanFrancisco => 2_900_336,
        })
    }

    /// Case-insensitive exact match on the display name
    pub fn from_name(name: &str) -> Option<Market> {
        let folded = name.to_lowercase();
        Market::ALL
            .into_iter()
            .find(|m| m.name().to_lowercase() == folded)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provider feeds read by the tools
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    PriceFeed,
    RentalPriceFeed,
    Volatility,
    ForSaleInventory,
}

impl Feed {
    /// Endpoint path for a market
    pub fn path(self, market: MarketId) -> String {
        match self {
            Feed::PriceFeed => format!("/v1/price_feed/{}/price_feed", market),
            Feed::RentalPriceFeed => format!("/v1/price_feed/{}/rental_price_feed", market),
            Feed::Volatility => format!("/v1/price_feed/{}/volatility", market),
            Feed::ForSaleInventory => {
                format!("/v1/for_sale_market_metrics/{}/for_sale_inventory", market)
            }
        }
    }

    /// Name of the scalar field carried by each response item
    pub fn field(self) -> &'static str {
        match self {
            Feed::PriceFeed => "price_feed",
            Feed::RentalPriceFeed => "rental_price_feed",
            Feed::Volatility => "pct_volatility",
            Feed::ForSaleInventory => "for_sale_inventory",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// One period's value from a feed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Period the value belongs to, when the provider reports it
    pub date: Option<NaiveDate>,

    pub value: f64,
}

impl MetricSample {
    pub fn new(value: f64) -> Self {
        Self { date: None, value }
    }

    pub fn dated(date: NaiveDate, value: f64) -> Self {
        Self { date: Some(date), value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_market_ids_are_distinct() {
        let ids: HashSet<MarketId> = Market::ALL.iter().map(|m| m.id()).collect();
        assert_eq!(ids.len(), Market::ALL.len());
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Market::from_name("austin"), Some(Market::Austin));
        assert_eq!(Market::from_name("SAN FRANCISCO"), Some(Market::SanFrancisco));
        assert_eq!(Market::from_name("new york"), None);
    }

    #[test]
    fn test_feed_paths() {
        let id = Market::Austin.id();
        assert_eq!(Feed::PriceFeed.path(id), "/v1/price_feed/2900049/price_feed");
        assert_eq!(
            Feed::ForSaleInventory.path(id),
            "/v1/for_sale_market_metrics/2900049/for_sale_inventory"
        );
        assert_eq!(Feed::Volatility.field(), "pct_volatility");
    }
}
