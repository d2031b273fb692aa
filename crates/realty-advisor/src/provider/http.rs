//! Parcl Labs market data client.
//!
//! Read-only GET endpoints keyed by market id. Each response carries an
//! `items` array ordered newest first, one scalar metric per item.
//! API documentation: https://docs.parcllabs.com

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::MarketDataClient;
use crate::config::MarketDataConfig;
use crate::error::{MarketError, Result};
use crate::model::{Feed, MarketId, MetricSample};

const PROVIDER_NAME: &str = "ParclLabs";
const USER_AGENT: &str = concat!("realty-advisor/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    items: Vec<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "message")]
    detail: Option<Value>,
}

/// Extract one feed's samples from a response body
pub fn parse_feed_response(body: &str, feed: Feed) -> Result<Vec<MetricSample>> {
    let response: FeedResponse = serde_json::from_str(body)?;
    let field = feed.field();

    response
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let value = item.get(field).and_then(Value::as_f64).ok_or_else(|| {
                MarketError::Decode(format!("item {} has no numeric '{}'", index, field))
            })?;
            let date = item
                .get("date")
                .and_then(Value::as_str)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
            Ok(MetricSample { date, value })
        })
        .collect()
}

// ============================================================================
// ParclLabsClient
// ============================================================================

/// HTTP client holding its own credentials and timeout
pub struct ParclLabsClient {
    client: Client,
    config: MarketDataConfig,
}

impl ParclLabsClient {
    pub fn new(config: MarketDataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, market: MarketId, feed: Feed) -> String {
        format!("{}{}", self.config.base_url, feed.path(market))
    }

    async fn get(&self, url: &str, limit: usize) -> Result<String> {
        debug!(url, limit, "Market data request");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.config.api_key)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(|e| if e.is_timeout() { MarketError::Timeout } else { MarketError::Network(e) })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(MarketError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.detail)
                .map(|d| match d {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or(body);

            warn!(status = status.as_u16(), %message, "Market data request failed");
            return Err(MarketError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| if e.is_timeout() { MarketError::Timeout } else { MarketError::Network(e) })
    }
}

#[async_trait]
impl MarketDataClient for ParclLabsClient {
    async fn fetch_series(&self, market: MarketId, feed: Feed, limit: usize) -> Result<Vec<MetricSample>> {
        let body = self.get(&self.url(market, feed), limit).await?;
        let samples = parse_feed_response(&body, feed)?;
        debug!(%market, %feed, count = samples.len(), "Market data received");
        Ok(samples)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use agent_core::AgentError;
    use axum::{
        http::{HeaderMap, StatusCode as StubStatus, Uri},
        Router,
    };

    use crate::model::Market;

    #[test]
    fn test_parse_price_feed() {
        let body = r#"{"parcl_id": 2900049, "items": [{"date": "2026-10-01", "price_feed": 412.5}, {"date": "2026-09-30", "price_feed": 410}]}"#;
        let samples = parse_feed_response(body, Feed::PriceFeed).unwrap();

        assert_eq!(samples.len(), 2);
        assert!((samples[0].value - 412.5).abs() < f64::EPSILON);
        assert_eq!(samples[0].date, NaiveDate::from_ymd_opt(2026, 10, 1));
        assert!((samples[1].value - 410.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_without_dates() {
        let body = r#"{"items": [{"pct_volatility": 0.5}]}"#;
        let samples = parse_feed_response(body, Feed::Volatility).unwrap();
        assert_eq!(samples, vec![MetricSample::new(0.5)]);
    }

    #[test]
    fn test_parse_missing_items_is_empty() {
        let samples = parse_feed_response("{}", Feed::ForSaleInventory).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn test_parse_wrong_field_is_decode_error() {
        let body = r#"{"items": [{"price_feed": 412.5}]}"#;
        let err = parse_feed_response(body, Feed::RentalPriceFeed).unwrap_err();
        assert!(matches!(err, MarketError::Decode(_)));

        let body = r#"{"items": [{"price_feed": null}]}"#;
        assert!(parse_feed_response(body, Feed::PriceFeed).is_err());
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_feed_response("not json", Feed::PriceFeed).unwrap_err();
        assert!(matches!(err, MarketError::Serialization(_)));
    }

    #[test]
    fn test_url_uses_configured_base() {
        let config = MarketDataConfig::new("key").with_base_url("http://localhost:9000/");
        let client = ParclLabsClient::new(config).unwrap();
        assert_eq!(
            client.url(Market::Austin.id(), Feed::Volatility),
            "http://localhost:9000/v1/price_feed/2900049/volatility"
        );
        assert_eq!(client.name(), "ParclLabs");
    }

    // ------------------------------------------------------------------------
    // Transport against a local stub of the API
    // ------------------------------------------------------------------------

    /// What the stub saw: the `Authorization` header and the path + query
    type Seen = Arc<Mutex<Vec<(Option<String>, String)>>>;

    /// Serve one canned response on an ephemeral port; returns the base URL
    async fn stub(status: StubStatus, body: &'static str, delay: Duration) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let record = Arc::clone(&seen);

        let app = Router::new().fallback(move |headers: HeaderMap, uri: Uri| {
            let record = Arc::clone(&record);
            async move {
                let auth = headers
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                let target = uri.path_and_query().map(|pq| pq.as_str().to_owned()).unwrap_or_default();
                record.lock().unwrap().push((auth, target));
                tokio::time::sleep(delay).await;
                (status, body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), seen)
    }

    fn client_for(base_url: &str) -> ParclLabsClient {
        ParclLabsClient::new(MarketDataConfig::new("test-key").with_base_url(base_url)).unwrap()
    }

    async fn fetch_error(status: StubStatus, body: &'static str) -> MarketError {
        let (base, _) = stub(status, body, Duration::ZERO).await;
        client_for(&base)
            .fetch_series(Market::Austin.id(), Feed::PriceFeed, 1)
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_limit() {
        let (base, seen) = stub(
            StubStatus::OK,
            r#"{"items": [{"date": "2026-10-01", "price_feed": 412.5}]}"#,
            Duration::ZERO,
        )
        .await;

        let samples = client_for(&base)
            .fetch_series(Market::Austin.id(), Feed::PriceFeed, 1)
            .await
            .unwrap();

        assert_eq!(samples.len(), 1);
        assert!((samples[0].value - 412.5).abs() < f64::EPSILON);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0.as_deref(), Some("test-key"));
        assert_eq!(seen[0].1, "/v1/price_feed/2900049/price_feed?limit=1");
    }

    #[tokio::test]
    async fn test_volatility_requests_ten_items() {
        let (base, seen) = stub(StubStatus::OK, r#"{"items": []}"#, Duration::ZERO).await;

        let samples = client_for(&base)
            .fetch_series(Market::Houston.id(), Feed::Volatility, 10)
            .await
            .unwrap();

        assert!(samples.is_empty());
        assert_eq!(
            seen.lock().unwrap()[0].1,
            "/v1/price_feed/2899989/volatility?limit=10"
        );
    }

    #[tokio::test]
    async fn test_rejected_key_is_unauthorized() {
        for status in [StubStatus::UNAUTHORIZED, StubStatus::FORBIDDEN] {
            let err = fetch_error(status, r#"{"detail": "Invalid API key"}"#).await;
            assert!(matches!(err, MarketError::Unauthorized), "{}: {:?}", status, err);
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_retryable_upstream_error() {
        let err = fetch_error(StubStatus::TOO_MANY_REQUESTS, r#"{"detail": "slow down"}"#).await;
        assert!(
            matches!(err, MarketError::Upstream { status: 429, ref message } if message == "slow down"),
            "{:?}",
            err
        );
        assert!(AgentError::from(err).is_retryable());
    }

    #[tokio::test]
    async fn test_server_error_message_field() {
        let err = fetch_error(StubStatus::INTERNAL_SERVER_ERROR, r#"{"message": "boom"}"#).await;
        assert!(
            matches!(err, MarketError::Upstream { status: 500, ref message } if message == "boom"),
            "{:?}",
            err
        );
        assert!(matches!(AgentError::from(err), AgentError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_kept() {
        let err = fetch_error(StubStatus::NOT_FOUND, "no such market").await;
        assert!(
            matches!(err, MarketError::Upstream { status: 404, ref message } if message == "no such market"),
            "{:?}",
            err
        );
        assert!(matches!(AgentError::from(err), AgentError::Provider(_)));
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let err = fetch_error(StubStatus::OK, r#"{"items": [{"rental_price_feed": 1.9}]}"#).await;
        assert!(matches!(err, MarketError::Decode(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let (base, _) = stub(StubStatus::OK, r#"{"items": []}"#, Duration::from_secs(2)).await;
        let config = MarketDataConfig::new("test-key")
            .with_base_url(&base)
            .with_timeout(Duration::from_millis(100));

        let err = ParclLabsClient::new(config)
            .unwrap()
            .fetch_series(Market::Austin.id(), Feed::PriceFeed, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketError::Timeout), "{:?}", err);
        assert!(AgentError::from(err).is_retryable());
    }
}
