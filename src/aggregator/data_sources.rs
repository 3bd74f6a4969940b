//! Data sources for fetching launchpad and social provider payloads.
//!
//! Every fetch is a single bounded request-response: no retries, no backoff.
//! Social lookups return `Ok(None)` when the social API is not configured or
//! answers unusably, so callers degrade instead of failing.

use crate::aggregator::error::{AggregatorError, AggregatorResult};
use crate::aggregator::types::AggregatorConfig;
use crate::types::{RawProfile, RawSearchResponse, RawTimelineResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Fetch capabilities the aggregation service depends on.
///
/// The launchpad fetches return the unwrapped `response` payload as raw JSON
/// so the merge engine owns shape validation.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Creator-identity list for a token mint.
    async fn fetch_creators(&self, mint: &str) -> AggregatorResult<Value>;
    /// Claim-statistics list for a token mint.
    async fn fetch_claim_stats(&self, mint: &str) -> AggregatorResult<Value>;
    /// Social profile for a handle, `None` when unavailable.
    async fn fetch_profile(&self, handle: &str) -> AggregatorResult<Option<RawProfile>>;
    /// Recent timeline for a handle, `None` when unavailable.
    async fn fetch_timeline(&self, handle: &str)
        -> AggregatorResult<Option<RawTimelineResponse>>;
    /// Free-text search, `None` when unavailable.
    async fn search(&self, query: &str) -> AggregatorResult<Option<RawSearchResponse>>;
}

/// HTTP-backed provider hitting the launchpad and social APIs.
pub struct HttpDataSources {
    http_client: Client,
    config: AggregatorConfig,
}

impl HttpDataSources {
    /// Create a provider with a shared HTTP client honoring the configured
    /// request timeout.
    pub fn new(config: AggregatorConfig) -> AggregatorResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Call a launchpad endpoint and unwrap its `{success, response}`
    /// envelope.
    #[instrument(skip(self), fields(path = %path))]
    async fn launchpad_response(&self, path: &str, mint: &str) -> AggregatorResult<Value> {
        let key = self.config.launchpad_api_key.as_deref().ok_or_else(|| {
            AggregatorError::Config("launchpad API key not configured".to_string())
        })?;

        let url = format!("{}/token-launch/{}", self.config.launchpad_api_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[("tokenMint", mint)])
            .header("x-api-key", key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::Upstream(format!(
                "launchpad {} returned {}",
                path, status
            )));
        }

        let body = response.text().await?;
        unwrap_launchpad_envelope(&body, path)
    }

    /// Call a social API endpoint, tolerating mislabeled content types by
    /// always parsing the body text as JSON. Anything unusable degrades to
    /// `None`.
    #[instrument(skip(self, params), fields(path = %path))]
    async fn social_fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AggregatorResult<Option<T>> {
        let (Some(host), Some(key)) = (
            self.config.social_api_host.as_deref(),
            self.config.social_api_key.as_deref(),
        ) else {
            debug!("social API not configured, skipping lookup");
            return Ok(None);
        };

        let url = format!("https://{}/{}", host, path);
        let response = self
            .http_client
            .get(&url)
            .query(params)
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "social API returned error status");
            return Ok(None);
        }

        let body = response.text().await?;
        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                debug!(error = %e, "undecodable social API body");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl DataProvider for HttpDataSources {
    async fn fetch_creators(&self, mint: &str) -> AggregatorResult<Value> {
        self.launchpad_response("creator/v3", mint).await
    }

    async fn fetch_claim_stats(&self, mint: &str) -> AggregatorResult<Value> {
        self.launchpad_response("claim-stats", mint).await
    }

    async fn fetch_profile(&self, handle: &str) -> AggregatorResult<Option<RawProfile>> {
        self.social_fetch("screenname.php", &[("screenname", handle)])
            .await
    }

    async fn fetch_timeline(
        &self,
        handle: &str,
    ) -> AggregatorResult<Option<RawTimelineResponse>> {
        self.social_fetch("timeline.php", &[("screenname", handle)])
            .await
    }

    async fn search(&self, query: &str) -> AggregatorResult<Option<RawSearchResponse>> {
        self.social_fetch("search.php", &[("query", query), ("search_type", "Top")])
            .await
    }
}

/// Unwrap a launchpad `{success, response}` envelope from a body that may be
/// text-labelled JSON.
fn unwrap_launchpad_envelope(body: &str, context: &str) -> AggregatorResult<Value> {
    let envelope: Value = serde_json::from_str(body).map_err(|e| {
        AggregatorError::Upstream(format!("launchpad {} body is not JSON: {}", context, e))
    })?;

    if envelope.get("success").and_then(Value::as_bool) != Some(true) {
        let reason = envelope
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unsuccessful response");
        return Err(AggregatorError::Upstream(format!(
            "launchpad {}: {}",
            context, reason
        )));
    }

    envelope.get("response").cloned().ok_or_else(|| {
        AggregatorError::Upstream(format!("launchpad {} envelope has no response", context))
    })
}
