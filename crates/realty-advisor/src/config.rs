//! Configuration
//!
//! Settings are read through a lookup function so they can be built from the
//! process environment or from a fixed map in tests.

use std::fmt;
use std::time::Duration;

use crate::error::{MarketError, Result};
use crate::resolver::UnknownLocationPolicy;

pub const DEFAULT_BASE_URL: &str = "https://api.parcllabs.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "PARCL_LABS_API_KEY";
pub const ENV_BASE_URL: &str = "PARCL_LABS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MARKET_DATA_TIMEOUT_SECS";
pub const ENV_LOCATION_POLICY: &str = "UNKNOWN_LOCATION_POLICY";

/// Connection settings for the market data API
#[derive(Clone)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl MarketDataConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for MarketDataConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketDataConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Everything the advisor tools need from the environment
#[derive(Clone, Debug, Default)]
pub struct AdvisorConfig {
    /// `None` when no API key is configured
    pub market_data: Option<MarketDataConfig>,

    pub unknown_location: UnknownLocationPolicy,
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let market_data = match non_empty(ENV_API_KEY) {
            Some(api_key) => {
                let mut config = MarketDataConfig::new(api_key.trim());
                if let Some(base_url) = non_empty(ENV_BASE_URL) {
                    config = config.with_base_url(base_url.trim());
                }
                if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
                    let secs: u64 = raw.trim().parse().map_err(|_| {
                        MarketError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))
                    })?;
                    if secs == 0 {
                        return Err(MarketError::Config(format!("{} must be greater than zero", ENV_TIMEOUT_SECS)));
                    }
                    config = config.with_timeout(Duration::from_secs(secs));
                }
                Some(config)
            }
            None => None,
        };

        let unknown_location = match non_empty(ENV_LOCATION_POLICY) {
            Some(raw) => raw.parse::<UnknownLocationPolicy>().map_err(MarketError::Config)?,
            None => UnknownLocationPolicy::default(),
        };

        Ok(Self {
            market_data,
            unknown_location,
        })
    }
}
