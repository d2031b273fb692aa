//! Server Configuration

use std::net::SocketAddr;

use thiserror::Error;

/// Port the host listens on unless `BIND_ADDR` says otherwise
pub const DEFAULT_PORT: u16 = 3000;

pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_PLATFORM_API_KEY: &str = "PLATFORM_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub platform_api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = match lookup(ENV_BIND_ADDR) {
            Some(value) => value.trim().parse::<SocketAddr>().map_err(|_| ConfigError::InvalidAddr {
                var: ENV_BIND_ADDR,
                value,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        };

        let platform_api_key = lookup(ENV_PLATFORM_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            bind_addr,
            platform_api_key,
        })
    }
}
