//! Raw provider payload types shared across the aggregation pipeline.
//!
//! These mirror the JSON shapes the external providers actually return. Every
//! field the pipeline does not strictly require is optional, so a sparse or
//! partially broken payload still deserializes and degrades field by field.

use serde::{Deserialize, Serialize};

/// A wallet address as returned by the launchpad API (opaque base58 string).
pub type Wallet = String;

/// One creator-identity record from the launchpad `creator/v3` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCreatorIdentity {
    /// Wallet address, the merge key. Required.
    pub wallet: Wallet,
    /// Launchpad display name
    #[serde(default)]
    pub username: Option<String>,
    /// Profile picture URL
    #[serde(default)]
    pub pfp: Option<String>,
    /// Royalty share in basis points (0-10000)
    #[serde(default)]
    pub royalty_bps: Option<u32>,
    /// True for the token launcher, false for fee recipients
    #[serde(default)]
    pub is_creator: bool,
    /// Linked identity provider (e.g. "twitter")
    #[serde(default)]
    pub provider: Option<String>,
    /// Username at the linked provider
    #[serde(default)]
    pub provider_username: Option<String>,
}

/// One claim-statistics record from the launchpad `claim-stats` endpoint.
///
/// Carries the same identity fields plus the claimed amount, which the
/// provider serializes as a decimal string of lamports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClaimStat {
    /// Wallet address, the merge key. Required.
    pub wallet: Wallet,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub pfp: Option<String>,
    #[serde(default)]
    pub royalty_bps: Option<u32>,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub provider_username: Option<String>,
    /// Total claimed lamports; a decimal string, occasionally a bare number
    #[serde(default)]
    pub total_claimed: Option<serde_json::Value>,
}

/// Raw social profile payload from the `screenname` lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProfile {
    /// The resolved handle
    #[serde(default)]
    pub profile: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    /// Bio text
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Following count
    #[serde(default)]
    pub friends: Option<u64>,
    /// Follower count
    #[serde(default)]
    pub sub_count: Option<u64>,
    /// Lifetime post count
    #[serde(default)]
    pub statuses_count: Option<u64>,
    #[serde(default)]
    pub media_count: Option<u64>,
    /// Account creation time, e.g. "Wed Oct 10 20:19:24 +0000 2018"
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub blue_verified: Option<bool>,
    #[serde(default)]
    pub protected: Option<bool>,
}

/// One post from the timeline lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimelineEvent {
    #[serde(default)]
    pub tweet_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Like count
    #[serde(default)]
    pub favorites: Option<u64>,
    #[serde(default)]
    pub replies: Option<u64>,
    #[serde(default)]
    pub retweets: Option<u64>,
}

/// Timeline lookup response: recent posts plus an optional pinned post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTimelineResponse {
    #[serde(default)]
    pub pinned: Option<RawTimelineEvent>,
    #[serde(default)]
    pub timeline: Vec<RawTimelineEvent>,
}

/// Author block embedded in a search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchAuthor {
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

/// One hit from the search lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchHit {
    #[serde(default)]
    pub tweet_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub favorites: Option<u64>,
    #[serde(default)]
    pub replies: Option<u64>,
    /// Hits without an author block are unusable and get skipped
    #[serde(default)]
    pub user_info: Option<RawSearchAuthor>,
}

/// Search lookup response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timeline: Vec<RawSearchHit>,
}
