//! Realty agent tool host
//!
//! Axum-based server exposing the real-estate market data tools to the
//! hosting agent platform.

mod app;
mod config;
mod handlers;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::ToolRegistry;
use realty_advisor::{
    register_tools, AdvisorConfig, LocationResolver, MarketDataClient, MockMarketDataClient,
    ParclLabsClient,
};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let advisor = AdvisorConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    // Market data client holds its own credentials
    let client: Arc<dyn MarketDataClient> = match advisor.market_data {
        Some(config) => {
            tracing::info!(base_url = %config.base_url, timeout = ?config.timeout, "✓ Market data API configured");
            Arc::new(ParclLabsClient::new(config)?)
        }
        None => {
            tracing::warn!("⚠ Market data API key not configured - serving mock data");
            tracing::warn!("  Set PARCL_LABS_API_KEY in .env");
            Arc::new(MockMarketDataClient::new())
        }
    };

    let resolver = Arc::new(LocationResolver::new(advisor.unknown_location));
    tracing::info!("Unknown location policy: {}", advisor.unknown_location);

    let mut tools = ToolRegistry::new();
    register_tools(&mut tools, client.clone(), resolver);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    if server.platform_api_key.is_none() {
        tracing::warn!("⚠ PLATFORM_API_KEY not set - tool endpoints are unauthenticated");
    }

    let state = AppState {
        tools: Arc::new(tools),
        provider_name: client.name().into(),
        platform_api_key: server.platform_api_key.map(Into::into),
    };

    let app = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(server.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 realty agent host running on http://{}", server.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/tools         - List tools and prices");
    tracing::info!("  POST /api/tools/{{name}}  - Invoke a tool");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
