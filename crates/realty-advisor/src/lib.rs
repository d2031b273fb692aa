//! # realty-advisor
//!
//! Agent tools over a real-estate market data API.
//!
//! Every tool call follows the same one-shot path:
//!
//! ```text
//! location ──▶ LocationResolver ──▶ MarketId
//!                                     │
//!                                     ▼
//!                         MarketDataClient (1 GET)
//!                                     │
//!                                     ▼
//!                    latest / average(10) ──▶ text · data · ui
//! ```
//!
//! | Tool                 | Data key             |
//! |----------------------|----------------------|
//! | `price_feed`         | `price`              |
//! | `rental_price_feed`  | `rental_price`       |
//! | `price_volatility`   | `volatility_average` |
//! | `for_sale_inventory` | `sale_inventory`     |

pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod provider;
pub mod resolver;
pub mod svckit;

use std::sync::Arc;

use agent_core::ToolRegistry;

pub use config::{AdvisorConfig, MarketDataConfig};
pub use error::{InsufficientData, MarketError, Result, UnknownLocation};
pub use metrics::{average, VOLATILITY_WINDOW};
pub use model::{Feed, Market, MarketId, MetricSample};
pub use provider::{MarketDataClient, MockMarketDataClient, ParclLabsClient};
pub use resolver::{LocationResolver, UnknownLocationPolicy};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{LatestFeedTool, MarketContext, VolatilityTool};
}

/// Register every market tool against one client and resolver
pub fn register_tools(
    registry: &mut ToolRegistry,
    client: Arc<dyn MarketDataClient>,
    resolver: Arc<LocationResolver>,
) {
    let ctx = tools::MarketContext::new(client, resolver);

    registry.register(tools::LatestFeedTool::price_feed(ctx.clone()));
    registry.register(tools::LatestFeedTool::rental_price_feed(ctx.clone()));
    registry.register(tools::LatestFeedTool::sale_inventory(ctx.clone()));
    registry.register(tools::VolatilityTool::new(ctx));
}
