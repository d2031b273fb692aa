//! Volatility Tool
//!
//! Averages the most recent daily volatility readings for a market.

use async_trait::async_trait;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use super::envelope::{market_schema, FeedReport, MarketContext};
use crate::error::MarketError;
use crate::metrics::{average, VOLATILITY_WINDOW};
use crate::model::Feed;

const NAME: &str = "price_volatility";

pub struct VolatilityTool {
    ctx: MarketContext,
}

impl VolatilityTool {
    pub fn new(ctx: MarketContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for VolatilityTool {
    fn schema(&self) -> ToolSchema {
        market_schema(
            NAME,
            "Price Volatility",
            "Get the average daily housing price volatility (%) over the last 10 days for a US city.",
        )
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let (location, market) = self.ctx.locate(NAME, call)?;
        let samples = self
            .ctx
            .client
            .fetch_series(market, Feed::Volatility, VOLATILITY_WINDOW.get())
            .await?;

        let values: Vec<f64> = samples.iter().map(|s| s.value).collect();
        let avg = average(&values, VOLATILITY_WINDOW).map_err(MarketError::from)?;

        Ok(FeedReport {
            tool: NAME,
            heading: "Price Volatility",
            location,
            market,
            key: "volatility_average",
            value: avg,
            text: format!(
                "The average price volatility for {} over the last {} days is {}%.",
                location, VOLATILITY_WINDOW, avg
            ),
        }
        .into_result())
    }
}
