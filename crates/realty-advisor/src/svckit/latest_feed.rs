//! Latest-Value Tools
//!
//! Price, rent, and inventory all read the newest item of one feed. They
//! differ only in wording, so one tool type carries a per-feed descriptor.

use async_trait::async_trait;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use super::envelope::{market_schema, FeedReport, MarketContext};
use crate::error::MarketError;
use crate::metrics::latest;
use crate::model::Feed;

/// Static description of one latest-value tool
struct FeedDescriptor {
    feed: Feed,
    name: &'static str,
    title: &'static str,
    description: &'static str,
    heading: &'static str,
    key: &'static str,
    render: fn(&str, f64) -> String,
}

static PRICE_FEED: FeedDescriptor = FeedDescriptor {
    feed: Feed::PriceFeed,
    name: "price_feed",
    title: "Housing Price Feed",
    description: "Get the latest daily housing price per square foot for a US city.",
    heading: "Price Feed",
    key: "price",
    render: |location, price| {
        format!("The latest price feed for {} is {} USD per square foot.", location, price)
    },
};

static RENTAL_PRICE_FEED: FeedDescriptor = FeedDescriptor {
    feed: Feed::RentalPriceFeed,
    name: "rental_price_feed",
    title: "Rental Price Feed",
    description: "Get the latest daily rent per square foot for a US city.",
    heading: "Rental Price Feed",
    key: "rental_price",
    render: |location, rent| {
        format!("The latest rental price feed for {} is {} USD per square foot.", location, rent)
    },
};

static SALE_INVENTORY: FeedDescriptor = FeedDescriptor {
    feed: Feed::ForSaleInventory,
    name: "for_sale_inventory",
    title: "For-Sale Inventory",
    description: "Get the number of homes currently listed for sale in a US city.",
    heading: "For-Sale Inventory",
    key: "sale_inventory",
    render: |location, inventory| {
        format!("There are {} homes currently for sale in {}.", inventory, location)
    },
};

/// Reports the newest sample of a single feed
pub struct LatestFeedTool {
    ctx: MarketContext,
    descriptor: &'static FeedDescriptor,
}

impl LatestFeedTool {
    /// `price_feed`: price per square foot
    pub fn price_feed(ctx: MarketContext) -> Self {
        Self { ctx, descriptor: &PRICE_FEED }
    }

    /// `rental_price_feed`: rent per square foot
    pub fn rental_price_feed(ctx: MarketContext) -> Self {
        Self { ctx, descriptor: &RENTAL_PRICE_FEED }
    }

    /// `for_sale_inventory`: homes listed for sale
    pub fn sale_inventory(ctx: MarketContext) -> Self {
        Self { ctx, descriptor: &SALE_INVENTORY }
    }

    pub fn feed(&self) -> Feed {
        self.descriptor.feed
    }
}

#[async_trait]
impl Tool for LatestFeedTool {
    fn schema(&self) -> ToolSchema {
        let d = self.descriptor;
        market_schema(d.name, d.title, d.description)
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let d = self.descriptor;
        let (location, market) = self.ctx.locate(d.name, call)?;
        let samples = self.ctx.client.fetch_series(market, d.feed, 1).await?;
        let value = latest(&samples).map_err(MarketError::from)?;

        Ok(FeedReport {
            tool: d.name,
            heading: d.heading,
            location,
            market,
            key: d.key,
            value,
            text: (d.render)(location, value),
        }
        .into_result())
    }
}
