//! Creator aggregation pipeline.
//!
//! Merges launchpad creator identities with claim statistics into one record
//! per wallet, enriches creators with social profile and activity data, and
//! classifies search hits into network suggestions. The pipeline functions
//! are pure over explicit inputs; fetching, caching and orchestration live
//! in their own components.

pub mod cache;
pub mod data_sources;
pub mod error;
pub mod merge;
pub mod profile;
pub mod search;
pub mod service;
pub mod timeline;
pub mod types;
pub mod units;

// Re-export the primary service and public types
pub use cache::{CacheEntry, Clock, EnrichmentCache, SystemClock};
pub use data_sources::{DataProvider, HttpDataSources};
pub use error::{AggregatorError, AggregatorResult};
pub use merge::{merge_creators, parse_claim_list, parse_identity_list};
pub use profile::transform_profile;
pub use search::classify_search;
pub use service::{CreatorAggregator, SocialSnapshot};
pub use timeline::aggregate_timeline;
pub use types::{
    ActivityHistogram, ActivityTier, AggregatorConfig, CreatorRecord, CreatorReport,
    EnrichedCreator, ProfileRecord, SuggestedContact,
};
pub use units::lamports_to_sol;

use std::sync::Arc;

/// Builder for convenient aggregator construction with sensible defaults.
pub struct AggregatorBuilder {
    config: AggregatorConfig,
}

impl AggregatorBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: AggregatorConfig::default(),
        }
    }

    /// Set the launchpad API base URL.
    pub fn with_launchpad_url(mut self, url: String) -> Self {
        self.config.launchpad_api_url = url;
        self
    }

    /// Set the launchpad API key.
    pub fn with_launchpad_key(mut self, key: String) -> Self {
        self.config.launchpad_api_key = Some(key);
        self
    }

    /// Set the social API host and key.
    pub fn with_social_api(mut self, host: String, key: String) -> Self {
        self.config.social_api_host = Some(host);
        self.config.social_api_key = Some(key);
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.config.request_timeout_seconds = seconds;
        self
    }

    /// Set the enrichment cache TTL in seconds.
    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.config.cache_ttl_seconds = seconds;
        self
    }

    /// Set the maximum concurrent per-creator enrichments.
    pub fn with_max_parallel_enrichments(mut self, max: usize) -> Self {
        self.config.max_parallel_enrichments = max;
        self
    }

    /// Toggle dropping zero-royalty entries before the merge.
    pub fn with_filter_zero_royalty(mut self, filter: bool) -> Self {
        self.config.filter_zero_royalty = filter;
        self
    }

    /// Set the free-text query used for network suggestions.
    pub fn with_network_query(mut self, query: String) -> Self {
        self.config.network_query = query;
        self
    }

    /// Build the configuration only.
    pub fn build_config(self) -> AggregatorConfig {
        self.config
    }

    /// Build a service over the HTTP-backed provider.
    pub fn build(self) -> AggregatorResult<CreatorAggregator> {
        let provider = Arc::new(HttpDataSources::new(self.config.clone())?);
        Ok(CreatorAggregator::new(provider, self.config))
    }

    /// Build a service over a caller-supplied provider.
    pub fn build_with_provider(self, provider: Arc<dyn DataProvider>) -> CreatorAggregator {
        CreatorAggregator::new(provider, self.config)
    }
}

impl Default for AggregatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
