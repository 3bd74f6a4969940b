//! Domain types and configuration for the creator aggregation pipeline.

use crate::aggregator::units::lamports_to_sol;
use crate::types::Wallet;
use serde::{Deserialize, Serialize};
use std::env;

/// Coarse posting-cadence bucket derived from posts per week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityTier {
    VeryActive,
    Active,
    Quiet,
}

impl ActivityTier {
    /// Classify a posting cadence. Thresholds are fixed; first match wins,
    /// so exactly 20 posts per week is `VeryActive`.
    pub fn from_posts_per_week(posts_per_week: u64) -> Self {
        if posts_per_week >= 20 {
            ActivityTier::VeryActive
        } else if posts_per_week >= 5 {
            ActivityTier::Active
        } else {
            ActivityTier::Quiet
        }
    }

    /// String form matching the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityTier::VeryActive => "very-active",
            ActivityTier::Active => "active",
            ActivityTier::Quiet => "quiet",
        }
    }
}

/// One merged record per wallet tied to a token launch.
///
/// Built by the merge engine from the identity and claim-stat lists and
/// immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorRecord {
    pub wallet: Wallet,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    /// Royalty share in basis points, 0 when the provider omitted it
    pub royalty_bps: u32,
    /// Launcher vs. fee-recipient role
    pub is_creator: bool,
    pub provider: Option<String>,
    pub provider_username: Option<String>,
    /// Claimed lamports, present only when a claim-stat record matched
    pub total_claimed_lamports: Option<u64>,
    /// Handle explicitly tagged as a social username during the merge
    pub social_username: Option<String>,
}

impl CreatorRecord {
    /// Handle used for enrichment lookups: the explicitly tagged social
    /// username wins over the generic provider username.
    pub fn resolved_handle(&self) -> Option<&str> {
        self.social_username
            .as_deref()
            .or(self.provider_username.as_deref())
    }

    /// Human-readable claimed amount, e.g. "1.5 SOL".
    pub fn total_claimed_display(&self) -> Option<String> {
        self.total_claimed_lamports.map(lamports_to_sol)
    }
}

/// Normalized social profile derived from a raw profile payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub handle: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub bio: String,
    pub location: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub media_count: u64,
    pub post_count: u64,
    /// "Since <year>" or "Unknown"
    pub account_age: String,
    pub posts_per_week: u64,
    pub activity: ActivityTier,
    pub is_verified: bool,
    pub is_protected: bool,
}

/// Post count for one weekday of the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPosts {
    pub day: String,
    pub posts: u64,
}

/// Engagement totals for one weekday of the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEngagement {
    pub day: String,
    pub likes: u64,
    pub replies: u64,
}

/// Trailing-7-day activity rollup, bucketed by weekday label.
///
/// Both series always hold exactly 7 entries, oldest day first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityHistogram {
    pub posts_by_day: Vec<DayPosts>,
    pub engagement_by_day: Vec<DayEngagement>,
}

/// A deduplicated search author suggested as a network contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedContact {
    pub handle: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    /// Short excerpt justifying the suggestion, capped at 60 characters
    pub reason: String,
    /// At most 3 tags from the fixed vocabulary
    pub tags: Vec<String>,
}

/// A merged creator together with its social enrichment, when available.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedCreator {
    pub creator: CreatorRecord,
    pub profile: Option<ProfileRecord>,
    pub activity: Option<ActivityHistogram>,
}

/// The assembled per-mint response consumed by presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorReport {
    pub mint: String,
    pub creators: Vec<EnrichedCreator>,
    pub network: Vec<SuggestedContact>,
}

/// Aggregator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Launchpad API base URL
    pub launchpad_api_url: String,
    /// Launchpad API key
    pub launchpad_api_key: Option<String>,
    /// Social API host (enrichment is skipped when unset)
    pub social_api_host: Option<String>,
    /// Social API key
    pub social_api_key: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
    /// Enrichment cache TTL in seconds
    pub cache_ttl_seconds: u64,
    /// Maximum concurrent per-creator enrichments
    pub max_parallel_enrichments: usize,
    /// Drop zero-royalty entries before merging
    pub filter_zero_royalty: bool,
    /// Free-text query used for network suggestions
    pub network_query: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            launchpad_api_url: "https://public-api-v2.bags.fm/api/v1".to_string(),
            launchpad_api_key: None,
            social_api_host: None,
            social_api_key: None,
            request_timeout_seconds: 10,
            cache_ttl_seconds: 300,
            max_parallel_enrichments: 10,
            filter_zero_royalty: true,
            network_query: "solana build".to_string(),
        }
    }
}

impl AggregatorConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            launchpad_api_url: env::var("LAUNCHPAD_API_URL")
                .unwrap_or(defaults.launchpad_api_url),
            launchpad_api_key: env::var("LAUNCHPAD_API_KEY").ok(),
            social_api_host: env::var("SOCIAL_API_HOST").ok(),
            social_api_key: env::var("SOCIAL_API_KEY").ok(),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_seconds),
            max_parallel_enrichments: env::var("MAX_PARALLEL_ENRICHMENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_parallel_enrichments),
            filter_zero_royalty: defaults.filter_zero_royalty,
            network_query: env::var("NETWORK_QUERY").unwrap_or(defaults.network_query),
        }
    }
}
