//! Shared plumbing for the market tools: location resolution and the
//! text / data / ui response envelope.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tracing::info;

use agent_core::{
    ParameterSchema, Result as CoreResult, ToolCall, ToolPrice, ToolResult, ToolSchema,
    UiDirective,
};

use crate::model::MarketId;
use crate::provider::MarketDataClient;
use crate::resolver::LocationResolver;

/// Fixed price charged for each market tool call
pub const CALL_PRICE: Decimal = dec!(0.01);

pub(crate) const LOCATION_PARAM: &str = "location";

/// Dependencies shared by every market tool
#[derive(Clone)]
pub struct MarketContext {
    pub client: Arc<dyn MarketDataClient>,
    pub resolver: Arc<LocationResolver>,
}

impl MarketContext {
    pub fn new(client: Arc<dyn MarketDataClient>, resolver: Arc<LocationResolver>) -> Self {
        Self { client, resolver }
    }

    /// Read the `location` argument and resolve it to a market
    pub(crate) fn locate<'a>(&self, tool: &str, call: &'a ToolCall) -> CoreResult<(&'a str, MarketId)> {
        let location = call.str_arg(LOCATION_PARAM)?;
        let market = self.resolver.resolve(location).map_err(crate::error::MarketError::from)?;

        info!(
            tool,
            agent = call.caller.agent_label(),
            location,
            market = %market,
            provider = self.client.name(),
            "Fetching market data"
        );

        Ok((location, market))
    }
}

/// Schema shared by the market tools: one required `location` string
pub(crate) fn market_schema(name: &str, title: &str, description: &str) -> ToolSchema {
    ToolSchema {
        name: name.into(),
        title: title.into(),
        description: description.into(),
        parameters: vec![ParameterSchema::required_string(
            LOCATION_PARAM,
            "City name, e.g. 'Austin' or 'New York City'",
        )],
        category: Some("real_estate".into()),
        has_side_effects: false,
        price: Some(ToolPrice::usd(CALL_PRICE)),
    }
}

/// One computed value ready to be rendered
pub struct FeedReport<'a> {
    pub tool: &'static str,
    pub heading: &'static str,
    pub location: &'a str,
    pub market: MarketId,
    pub key: &'static str,
    pub value: f64,
    pub text: String,
}

impl FeedReport<'_> {
    pub fn into_result(self) -> ToolResult {
        let mut data = json!({
            "location": self.location,
            "market_id": self.market,
        });
        data[self.key] = json!(self.value);

        ToolResult::success(self.tool, self.text)
            .with_data(data)
            .with_ui(UiDirective::heading(self.heading))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_envelope() {
        let result = FeedReport {
            tool: "price_feed",
            heading: "Price Feed",
            location: "Austin",
            market: MarketId(2_900_049),
            key: "price",
            value: 412.5,
            text: "Austin: 412.5".into(),
        }
        .into_result();

        let data = result.data.unwrap();
        assert_eq!(data["price"], json!(412.5));
        assert_eq!(data["market_id"], json!(2_900_049));
        assert_eq!(data["location"], "Austin");
        assert_eq!(result.ui, Some(UiDirective::heading("Price Feed")));
    }

    #[test]
    fn test_schema_has_required_location_and_price() {
        let schema = market_schema("x", "X", "desc");
        assert_eq!(schema.parameters.len(), 1);
        assert!(schema.parameters[0].required);
        assert_eq!(schema.parameters[0].param_type, "string");
        assert_eq!(schema.price.unwrap().amount, dec!(0.01));
    }
}
