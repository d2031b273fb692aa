//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Upstream data provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool validation failed
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Not enough samples to compute a result
    #[error("Insufficient data: need {needed} samples, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller failed platform authentication
    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl AgentError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::ProviderUnavailable(_))
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AgentError::Provider(_) => "PROVIDER_ERROR",
            AgentError::ProviderUnavailable(_) => "PROVIDER_UNAVAILABLE",
            AgentError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            AgentError::ToolValidation(_) => "INVALID_INPUT",
            AgentError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            AgentError::Config(_) => "CONFIG_ERROR",
            AgentError::Auth(_) => "UNAUTHORIZED",
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(msg) => format!("The market data service returned an error: {}", msg),
            AgentError::ProviderUnavailable(_) => "The market data service is currently unavailable. Please try again.".into(),
            AgentError::ToolNotFound(name) => format!("The tool '{}' is not available.", name),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {}", msg),
            AgentError::InsufficientData { needed, available } => format!(
                "Not enough market data to answer: needed {} samples but only {} were available.",
                needed, available
            ),
            AgentError::Auth(_) => "Authentication failed. Please check your credentials.".into(),
            AgentError::Config(_) => "The service is misconfigured.".into(),
        }
    }
}
