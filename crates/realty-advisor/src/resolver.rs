//! Location Resolver
//!
//! Maps a free-text city name onto a provider market identifier.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::UnknownLocation;
use crate::model::{Market, MarketId};

/// What to do with a location that matches no supported market
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnknownLocationPolicy {
    /// Substitute a fixed market
    Fallback(Market),

    /// Fail with `UnknownLocation`
    Reject,
}

impl Default for UnknownLocationPolicy {
    fn default() -> Self {
        UnknownLocationPolicy::Fallback(Market::NewYorkCity)
    }
}

impl FromStr for UnknownLocationPolicy {
    type Err = String;

    /// Accepts `reject`, `fallback` (New York City), or `fallback:<market name>`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("reject") {
            return Ok(UnknownLocationPolicy::Reject);
        }
        if s.eq_ignore_ascii_case("fallback") {
            return Ok(UnknownLocationPolicy::default());
        }
        if let Some((head, market)) = s.split_once(':') {
            if head.eq_ignore_ascii_case("fallback") {
                return Market::from_name(market.trim())
                    .map(UnknownLocationPolicy::Fallback)
                    .ok_or_else(|| format!("unsupported fallback market: {}", market.trim()));
            }
        }
        Err(format!("unknown location policy: {}", s))
    }
}

impl fmt::Display for UnknownLocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownLocationPolicy::Fallback(market) => write!(f, "fallback:{}", market),
            UnknownLocationPolicy::Reject => f.write_str("reject"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LocationResolver {
    policy: UnknownLocationPolicy,
}

impl LocationResolver {
    pub fn new(policy: UnknownLocationPolicy) -> Self {
        Self { policy }
    }

    /// Resolver that fails on unsupported locations
    pub fn strict() -> Self {
        Self::new(UnknownLocationPolicy::Reject)
    }

    pub fn policy(&self) -> UnknownLocationPolicy {
        self.policy
    }

    pub fn resolve(&self, name: &str) -> Result<MarketId, UnknownLocation> {
        if let Some(market) = Market::from_name(name) {
            return Ok(market.id());
        }

        match self.policy {
            UnknownLocationPolicy::Fallback(market) => {
                warn!(location = name, fallback = %market, "Unsupported location, using fallback market");
                Ok(market.id())
            }
            UnknownLocationPolicy::Reject => Err(UnknownLocation {
                input: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_names_any_casing() {
        let resolver = LocationResolver::default();
        for market in Market::ALL {
            let name = market.name();
            assert_eq!(resolver.resolve(name), Ok(market.id()));
            assert_eq!(resolver.resolve(&name.to_uppercase()), Ok(market.id()));
            assert_eq!(resolver.resolve(&name.to_lowercase()), Ok(market.id()));
        }
        assert_eq!(resolver.resolve("hOuStOn"), Ok(Market::Houston.id()));
    }

    #[test]
    fn test_unknown_falls_back_to_new_york_by_default() {
        let resolver = LocationResolver::default();
        assert_eq!(resolver.resolve("Unknown City"), Ok(Market::NewYorkCity.id()));
        assert_eq!(resolver.resolve(""), Ok(Market::NewYorkCity.id()));
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let resolver = LocationResolver::strict();
        let err = resolver.resolve("Unknown City").unwrap_err();
        assert_eq!(err.input, "Unknown City");
        assert_eq!(resolver.resolve("Chicago"), Ok(Market::Chicago.id()));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "reject".parse::<UnknownLocationPolicy>(),
            Ok(UnknownLocationPolicy::Reject)
        );
        assert_eq!(
            "Fallback".parse::<UnknownLocationPolicy>(),
            Ok(UnknownLocationPolicy::Fallback(Market::NewYorkCity))
        );
        assert_eq!(
            "fallback:austin".parse::<UnknownLocationPolicy>(),
            Ok(UnknownLocationPolicy::Fallback(Market::Austin))
        );
        assert!("fallback:gotham".parse::<UnknownLocationPolicy>().is_err());
        assert!("maybe".parse::<UnknownLocationPolicy>().is_err());
    }

    #[test]
    fn test_custom_fallback_market() {
        let resolver = LocationResolver::new(UnknownLocationPolicy::Fallback(Market::Chicago));
        assert_eq!(resolver.resolve("Springfield"), Ok(Market::Chicago.id()));
    }
}
