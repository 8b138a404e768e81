//! Outbound client for the boost provider API.
//!
//! One fixed base URL, authenticated with a static `X-API-Key` header on every
//! call. Responses are relayed as raw JSON; the relay never interprets
//! provider payloads beyond success/failure.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::observability::{UPSTREAM_DURATION, UPSTREAM_ERRORS_TOTAL, UPSTREAM_REQUESTS_TOTAL};
use crate::types::OrderPayload;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider configuration error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: Value },
}

impl ProviderError {
    /// Detail relayed to callers: the captured provider payload when the
    /// provider responded, otherwise the transport/decode error text.
    pub fn detail(&self) -> Value {
        match self {
            ProviderError::Status { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoostClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

/// Shared provider client; cheap to clone the inner `reqwest::Client`, so one
/// instance lives in the router state for the whole process.
#[derive(Debug)]
pub struct BoostClient {
    http: Client,
    base_url: String,
}

impl BoostClient {
    pub fn new(cfg: &BoostClientConfig) -> Result<Self, ProviderError> {
        let mut api_key = HeaderValue::from_str(&cfg.api_key).map_err(|e| {
            ProviderError::Config(format!("API key is not a valid header value: {e}"))
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-api-key"), api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .connect_timeout(cfg.connect_timeout)
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn balance(&self) -> Result<Value, ProviderError> {
        let req = self.http.get(format!("{}/balance", self.base_url));
        self.dispatch("balance", req).await
    }

    pub async fn create_order(&self, payload: &OrderPayload) -> Result<Value, ProviderError> {
        let req = self
            .http
            .post(format!("{}/order", self.base_url))
            .json(payload);
        self.dispatch("create_order", req).await
    }

    pub async fn orders(&self, page: u32) -> Result<Value, ProviderError> {
        let req = self
            .http
            .get(format!("{}/orders", self.base_url))
            .query(&[("page", page)]);
        self.dispatch("list_orders", req).await
    }

    pub async fn order(&self, order_id: &str) -> Result<Value, ProviderError> {
        let req = self
            .http
            .get(format!("{}/order/{}", self.base_url, order_id));
        self.dispatch("order_status", req).await
    }

    async fn dispatch(
        &self,
        op: &'static str,
        req: RequestBuilder,
    ) -> Result<Value, ProviderError> {
        UPSTREAM_REQUESTS_TOTAL.inc();
        let started = Instant::now();
        let result = self.exchange(req).await;
        UPSTREAM_DURATION.observe(started.elapsed().as_secs_f64());
        match &result {
            Ok(_) => debug!(
                op,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "provider call ok"
            ),
            Err(e) => {
                UPSTREAM_ERRORS_TOTAL.inc();
                warn!(op, error = %e, "provider call failed");
            }
        }
        result
    }

    async fn exchange(&self, req: RequestBuilder) -> Result<Value, ProviderError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            // keep the provider payload intact for the caller
            let text = resp.text().await.unwrap_or_default();
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }
        resp.json::<Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}
