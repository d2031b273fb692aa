//! Error Types for Realty Advisor

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

/// Location did not match any supported market
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown location: '{input}'")]
pub struct UnknownLocation {
    pub input: String,
}

/// Fewer samples were available than the computation requires
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Insufficient data: need {needed} samples, got {available}")]
pub struct InsufficientData {
    pub needed: usize,
    pub available: usize,
}

#[derive(Error, Debug)]
pub enum MarketError {
    #[error(transparent)]
    UnknownLocation(#[from] UnknownLocation),

    #[error(transparent)]
    InsufficientData(#[from] InsufficientData),

    #[error("Market data request timed out")]
    Timeout,

    #[error("Market data API rejected the API key")]
    Unauthorized,

    #[error("Market data API returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed market data response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<MarketError> for AgentError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::UnknownLocation(e) => AgentError::ToolValidation(e.to_string()),
            MarketError::InsufficientData(InsufficientData { needed, available }) => {
                AgentError::InsufficientData { needed, available }
            }
            MarketError::Timeout => AgentError::ProviderUnavailable("request timed out".into()),
            MarketError::Network(e) => AgentError::ProviderUnavailable(e.to_string()),
            MarketError::Upstream { status, .. } if status == 429 || status >= 500 => {
                AgentError::ProviderUnavailable(format!("upstream returned HTTP {}", status))
            }
            e @ (MarketError::Upstream { .. }
            | MarketError::Unauthorized
            | MarketError::Decode(_)
            | MarketError::Serialization(_)) => AgentError::Provider(e.to_string()),
            MarketError::Config(msg) => AgentError::Config(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_agent_errors() {
        let err: AgentError = MarketError::from(UnknownLocation { input: "Gotham".into() }).into();
        assert!(matches!(err, AgentError::ToolValidation(ref m) if m.contains("Gotham")));

        let err: AgentError = MarketError::from(InsufficientData { needed: 10, available: 4 }).into();
        assert!(matches!(err, AgentError::InsufficientData { needed: 10, available: 4 }));

        let err: AgentError = MarketError::Upstream { status: 503, message: "down".into() }.into();
        assert!(err.is_retryable());

        let err: AgentError = MarketError::Upstream { status: 404, message: "no market".into() }.into();
        assert!(matches!(err, AgentError::Provider(_)));

        let err: AgentError = MarketError::Unauthorized.into();
        assert!(matches!(err, AgentError::Provider(_)));
    }
}
