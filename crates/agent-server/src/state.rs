//! Application State

use std::sync::Arc;

use agent_core::ToolRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tool registry with all available tools
    pub tools: Arc<ToolRegistry>,

    /// Name of the market data provider behind the tools
    pub provider_name: Arc<str>,

    /// Key inbound callers must present (None disables the check)
    pub platform_api_key: Option<Arc<str>>,
}
