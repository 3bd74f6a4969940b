//! End-to-end tests for the aggregation pipeline over a stub provider.

use async_trait::async_trait;
use creatorscope::aggregator::{
    AggregatorBuilder, AggregatorError, AggregatorResult, DataProvider,
};
use creatorscope::types::{
    RawProfile, RawSearchAuthor, RawSearchHit, RawSearchResponse, RawTimelineEvent,
    RawTimelineResponse,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Stub provider serving canned payloads; lookups for handles listed in
/// `failing_handles` error like a timed-out upstream.
struct StubProvider {
    creators: Value,
    claims: Value,
    failing_handles: Vec<String>,
    search_results: Option<RawSearchResponse>,
}

impl StubProvider {
    fn new(creators: Value, claims: Value) -> Self {
        Self {
            creators,
            claims,
            failing_handles: Vec::new(),
            search_results: None,
        }
    }
}

#[async_trait]
impl DataProvider for StubProvider {
    async fn fetch_creators(&self, _mint: &str) -> AggregatorResult<Value> {
        Ok(self.creators.clone())
    }

    async fn fetch_claim_stats(&self, _mint: &str) -> AggregatorResult<Value> {
        Ok(self.claims.clone())
    }

    async fn fetch_profile(&self, handle: &str) -> AggregatorResult<Option<RawProfile>> {
        if self.failing_handles.iter().any(|h| h == handle) {
            return Err(AggregatorError::Upstream("profile lookup timed out".to_string()));
        }
        Ok(Some(RawProfile {
            profile: Some(handle.to_string()),
            name: Some(format!("{} display", handle)),
            avatar: Some(format!("https://img/{}.png", handle)),
            desc: Some("building on solana".to_string()),
            location: None,
            friends: Some(50),
            sub_count: Some(1500),
            statuses_count: Some(1000),
            media_count: Some(12),
            created_at: Some("Wed Oct 10 20:19:24 +0000 2018".to_string()),
            blue_verified: Some(true),
            protected: None,
        }))
    }

    async fn fetch_timeline(
        &self,
        handle: &str,
    ) -> AggregatorResult<Option<RawTimelineResponse>> {
        if self.failing_handles.iter().any(|h| h == handle) {
            return Err(AggregatorError::Upstream("timeline lookup timed out".to_string()));
        }
        Ok(Some(RawTimelineResponse {
            pinned: None,
            timeline: vec![RawTimelineEvent {
                tweet_id: Some("1".to_string()),
                created_at: Some(chrono::Utc::now().to_rfc3339()),
                favorites: Some(3),
                replies: Some(1),
                retweets: None,
            }],
        }))
    }

    async fn search(&self, _query: &str) -> AggregatorResult<Option<RawSearchResponse>> {
        Ok(self.search_results.clone())
    }
}

fn search_hit(handle: &str, text: &str) -> RawSearchHit {
    RawSearchHit {
        tweet_id: None,
        text: Some(text.to_string()),
        created_at: None,
        favorites: None,
        replies: None,
        user_info: Some(RawSearchAuthor {
            screen_name: handle.to_string(),
            name: Some(handle.to_string()),
            avatar: None,
            description: None,
            followers_count: None,
        }),
    }
}

fn aggregator_over(provider: StubProvider) -> creatorscope::CreatorAggregator {
    AggregatorBuilder::new().build_with_provider(Arc::new(provider))
}

#[tokio::test]
async fn test_report_merges_and_enriches_creators() {
    let provider = StubProvider::new(
        json!([
            {"wallet": "A", "royaltyBps": 9000, "isCreator": true,
             "provider": "twitter", "providerUsername": "alice", "pfp": "https://launchpad/alice.png"},
            {"wallet": "B", "royaltyBps": 1000}
        ]),
        json!([
            {"wallet": "A", "royaltyBps": 9000, "totalClaimed": "1500000000"},
            {"wallet": "C", "royaltyBps": 500, "provider": "twitter", "providerUsername": "carol"}
        ]),
    );

    let report = aggregator_over(provider).report("Mint111").await.unwrap();

    // One record per distinct wallet, identity order first.
    let wallets: Vec<&str> = report
        .creators
        .iter()
        .map(|c| c.creator.wallet.as_str())
        .collect();
    assert_eq!(wallets, vec!["A", "B", "C"]);

    let a = &report.creators[0];
    assert_eq!(a.creator.total_claimed_lamports, Some(1_500_000_000));
    assert_eq!(
        a.creator.total_claimed_display().as_deref(),
        Some("1.5 SOL")
    );

    // Creator A resolves a handle and gets a full enrichment; the
    // launchpad avatar wins over the provider's.
    let profile = a.profile.as_ref().unwrap();
    assert_eq!(profile.handle, "alice");
    assert_eq!(
        profile.avatar_url.as_deref(),
        Some("https://launchpad/alice.png")
    );
    assert_eq!(profile.account_age, "Since 2018");
    assert!(profile.is_verified);
    let activity = a.activity.as_ref().unwrap();
    assert_eq!(activity.posts_by_day.len(), 7);
    assert_eq!(activity.engagement_by_day.len(), 7);
    let posts: u64 = activity.posts_by_day.iter().map(|d| d.posts).sum();
    assert_eq!(posts, 1);

    // Creator B has no handle at all, so no enrichment was attempted.
    assert!(report.creators[1].profile.is_none());
    assert!(report.creators[1].activity.is_none());

    // Creator C came from claim stats only, with its social handle tagged.
    let c = &report.creators[2];
    assert_eq!(c.creator.social_username.as_deref(), Some("carol"));
    assert_eq!(c.profile.as_ref().unwrap().handle, "carol");
}

#[tokio::test]
async fn test_failed_enrichment_degrades_only_that_creator() {
    let mut provider = StubProvider::new(
        json!([
            {"wallet": "A", "royaltyBps": 100, "provider": "twitter", "providerUsername": "alice"},
            {"wallet": "B", "royaltyBps": 100, "provider": "twitter", "providerUsername": "broken"}
        ]),
        json!([]),
    );
    provider.failing_handles = vec!["broken".to_string()];

    let report = aggregator_over(provider).report("Mint111").await.unwrap();
    assert_eq!(report.creators.len(), 2);

    // The failing lookup degrades its own record and nothing else.
    assert!(report.creators[0].profile.is_some());
    assert!(report.creators[1].profile.is_none());
    assert!(report.creators[1].activity.is_none());
    assert_eq!(report.creators[1].creator.wallet, "B");
}

#[tokio::test]
async fn test_zero_royalty_creators_are_filtered() {
    let provider = StubProvider::new(
        json!([
            {"wallet": "A", "royaltyBps": 0},
            {"wallet": "B", "royaltyBps": 100}
        ]),
        json!([{"wallet": "C", "royaltyBps": 0, "totalClaimed": "1"}]),
    );

    let report = aggregator_over(provider).report("Mint111").await.unwrap();
    let wallets: Vec<&str> = report
        .creators
        .iter()
        .map(|c| c.creator.wallet.as_str())
        .collect();
    assert_eq!(wallets, vec!["B"]);
}

#[tokio::test]
async fn test_network_suggestions_from_search() {
    let mut provider = StubProvider::new(json!([]), json!([]));
    provider.search_results = Some(RawSearchResponse {
        status: Some("ok".to_string()),
        timeline: (0..8)
            .map(|i| search_hit(&format!("user{}", i), "shipping smart contracts on solana"))
            .collect(),
    });

    let report = aggregator_over(provider).report("Mint111").await.unwrap();
    assert_eq!(report.network.len(), 5);
    for contact in &report.network {
        assert!(contact.tags.len() <= 3);
        assert!(!contact.tags.is_empty());
    }
    assert_eq!(report.network[0].handle, "user0");
}

#[tokio::test]
async fn test_missing_search_results_degrade_to_empty_network() {
    let provider = StubProvider::new(
        json!([{"wallet": "A", "royaltyBps": 100}]),
        json!([]),
    );

    let report = aggregator_over(provider).report("Mint111").await.unwrap();
    assert!(report.network.is_empty());
    assert_eq!(report.creators.len(), 1);
}

#[tokio::test]
async fn test_malformed_claim_list_fails_hard() {
    let provider = StubProvider::new(
        json!([{"wallet": "A", "royaltyBps": 100}]),
        json!("not a list"),
    );

    let err = aggregator_over(provider).report("Mint111").await.unwrap_err();
    assert!(matches!(err, AggregatorError::MalformedInput(_)));
}

#[tokio::test]
async fn test_report_serializes_with_camel_case_fields() {
    let provider = StubProvider::new(
        json!([{"wallet": "A", "royaltyBps": 100, "provider": "twitter", "providerUsername": "alice"}]),
        json!([{"wallet": "A", "royaltyBps": 100, "totalClaimed": "250000000"}]),
    );

    let report = aggregator_over(provider).report("Mint111").await.unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let creator = &value["creators"][0]["creator"];
    assert_eq!(creator["royaltyBps"], 100);
    assert_eq!(creator["totalClaimedLamports"], 250_000_000);
    assert_eq!(creator["socialUsername"], "alice");

    let profile = &value["creators"][0]["profile"];
    assert_eq!(profile["accountAge"], "Since 2018");
    assert!(profile["postsPerWeek"].is_u64());
    assert!(profile["activity"].is_string());
}
