//! Aggregation service - fetch, merge, enrich, assemble.
//!
//! Orchestrates the pipeline for one token mint: both launchpad lists are
//! fetched concurrently and merged, every merged creator is enriched in
//! parallel, and a search pass supplies network suggestions. Enrichment
//! failures are isolated per creator; only malformed launchpad data fails
//! the report as a whole.

use crate::aggregator::cache::{Clock, EnrichmentCache, SystemClock};
use crate::aggregator::data_sources::DataProvider;
use crate::aggregator::error::{AggregatorError, AggregatorResult};
use crate::aggregator::merge::{merge_creators, parse_claim_list, parse_identity_list};
use crate::aggregator::profile::transform_profile;
use crate::aggregator::search::classify_search;
use crate::aggregator::timeline::aggregate_timeline;
use crate::aggregator::types::{
    AggregatorConfig, CreatorRecord, CreatorReport, EnrichedCreator,
};
use crate::types::{RawClaimStat, RawProfile, RawTimelineResponse};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// Cached social lookup for one handle: the profile payload plus the
/// timeline, when the timeline lookup succeeded too.
#[derive(Debug, Clone)]
pub struct SocialSnapshot {
    pub profile: RawProfile,
    pub timeline: Option<RawTimelineResponse>,
}

/// The creator aggregation service.
pub struct CreatorAggregator {
    provider: Arc<dyn DataProvider>,
    config: AggregatorConfig,
    clock: Arc<dyn Clock>,
    social_cache: Arc<Mutex<EnrichmentCache<SocialSnapshot>>>,
    enrichment_permits: Arc<Semaphore>,
}

impl CreatorAggregator {
    /// Create a service over the given provider using wall-clock time.
    pub fn new(provider: Arc<dyn DataProvider>, config: AggregatorConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Create a service with an injected clock (drives both cache expiry and
    /// time-window derivations).
    pub fn with_clock(
        provider: Arc<dyn DataProvider>,
        config: AggregatorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let social_cache = Arc::new(Mutex::new(EnrichmentCache::new(
            config.cache_ttl_seconds,
            clock.clone(),
        )));
        let enrichment_permits = Arc::new(Semaphore::new(config.max_parallel_enrichments.max(1)));
        Self {
            provider,
            config,
            clock,
            social_cache,
            enrichment_permits,
        }
    }

    /// Build the full creator report for a token mint.
    #[instrument(skip(self), fields(mint = %mint))]
    pub async fn report(&self, mint: &str) -> AggregatorResult<CreatorReport> {
        let (creators_raw, claims_raw) = tokio::join!(
            self.provider.fetch_creators(mint),
            self.provider.fetch_claim_stats(mint)
        );

        let identities = parse_identity_list(&creators_raw?)?;
        let claims = parse_claim_list(&claims_raw?)?;
        let merged = merge_creators(&identities, &claims, self.config.filter_zero_royalty);
        debug!(
            identities = identities.len(),
            claims = claims.len(),
            merged = merged.len(),
            "merged launchpad collections"
        );

        let creators = self.enrich_all(merged).await;

        let network = match self.provider.search(&self.config.network_query).await {
            Ok(Some(results)) => classify_search(&results.timeline),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "network suggestion search failed");
                Vec::new()
            }
        };

        info!(
            creators = creators.len(),
            suggestions = network.len(),
            "assembled creator report"
        );

        Ok(CreatorReport {
            mint: mint.to_string(),
            creators,
            network,
        })
    }

    /// Fetch the filtered claim-stats list for a mint without enrichment.
    #[instrument(skip(self), fields(mint = %mint))]
    pub async fn claim_stats(&self, mint: &str) -> AggregatorResult<Vec<RawClaimStat>> {
        let raw = self.provider.fetch_claim_stats(mint).await?;
        let claims = parse_claim_list(&raw)?;
        Ok(claims
            .into_iter()
            .filter(|c| !self.config.filter_zero_royalty || c.royalty_bps != Some(0))
            .collect())
    }

    /// Enrich every merged creator concurrently, preserving merge order.
    /// Each creator's enrichment is independent; a failure leaves that one
    /// record un-enriched.
    async fn enrich_all(&self, merged: Vec<CreatorRecord>) -> Vec<EnrichedCreator> {
        let mut enriched: Vec<EnrichedCreator> = merged
            .iter()
            .map(|creator| EnrichedCreator {
                creator: creator.clone(),
                profile: None,
                activity: None,
            })
            .collect();

        let mut tasks = JoinSet::new();
        for (pos, creator) in merged.into_iter().enumerate() {
            let provider = self.provider.clone();
            let cache = self.social_cache.clone();
            let clock = self.clock.clone();
            let permits = self.enrichment_permits.clone();

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                (pos, Self::enrich_creator(provider, cache, clock, creator).await)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((pos, record)) => enriched[pos] = record,
                Err(e) => warn!(error = %e, "enrichment task aborted"),
            }
        }

        enriched
    }

    async fn enrich_creator(
        provider: Arc<dyn DataProvider>,
        cache: Arc<Mutex<EnrichmentCache<SocialSnapshot>>>,
        clock: Arc<dyn Clock>,
        creator: CreatorRecord,
    ) -> EnrichedCreator {
        let Some(handle) = creator.resolved_handle().map(str::to_string) else {
            return EnrichedCreator {
                creator,
                profile: None,
                activity: None,
            };
        };

        let cached = { cache.lock().await.get(&handle) };
        let snapshot = match cached {
            Some(snapshot) => {
                debug!(handle = %handle, "social snapshot served from cache");
                Some(snapshot)
            }
            None => match Self::fetch_social(provider.as_ref(), &handle).await {
                Ok(Some(snapshot)) => {
                    cache.lock().await.insert(&handle, snapshot.clone());
                    Some(snapshot)
                }
                Ok(None) => None,
                Err(e) => {
                    warn!(handle = %handle, error = %e, "enrichment unavailable");
                    None
                }
            },
        };

        let now = clock.now();
        let (profile, activity) = match snapshot {
            Some(snapshot) => {
                let profile = transform_profile(
                    &snapshot.profile,
                    Some(&handle),
                    creator.avatar_url.as_deref(),
                    now,
                );
                let activity = snapshot
                    .timeline
                    .as_ref()
                    .map(|timeline| aggregate_timeline(timeline, now));
                (Some(profile), activity)
            }
            None => (None, None),
        };

        EnrichedCreator {
            creator,
            profile,
            activity,
        }
    }

    /// One social lookup: profile first, timeline only when a profile came
    /// back. A timeline failure degrades to a profile-only snapshot.
    async fn fetch_social(
        provider: &dyn DataProvider,
        handle: &str,
    ) -> AggregatorResult<Option<SocialSnapshot>> {
        let profile = provider.fetch_profile(handle).await.map_err(|e| {
            AggregatorError::EnrichmentUnavailable {
                handle: handle.to_string(),
                reason: e.to_string(),
            }
        })?;
        let Some(profile) = profile else {
            return Ok(None);
        };

        let timeline = match provider.fetch_timeline(handle).await {
            Ok(timeline) => timeline,
            Err(e) => {
                debug!(handle = %handle, error = %e, "timeline lookup failed");
                None
            }
        };

        Ok(Some(SocialSnapshot { profile, timeline }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawSearchResponse;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub provider with canned launchpad data and countable social calls.
    struct StubProvider {
        creators: Value,
        claims: Value,
        profile_calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(creators: Value, claims: Value) -> Self {
            Self {
                creators,
                claims,
                profile_calls: AtomicUsize::new(0),
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
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(RawProfile {
                profile: Some(handle.to_string()),
                name: Some(format!("{} display", handle)),
                avatar: None,
                desc: None,
                location: None,
                friends: None,
                sub_count: Some(10),
                statuses_count: None,
                media_count: None,
                created_at: None,
                blue_verified: None,
                protected: None,
            }))
        }

        async fn fetch_timeline(
            &self,
            _handle: &str,
        ) -> AggregatorResult<Option<RawTimelineResponse>> {
            Ok(Some(RawTimelineResponse {
                pinned: None,
                timeline: vec![],
            }))
        }

        async fn search(&self, _query: &str) -> AggregatorResult<Option<RawSearchResponse>> {
            Ok(None)
        }
    }

    fn service(provider: StubProvider) -> CreatorAggregator {
        CreatorAggregator::new(Arc::new(provider), AggregatorConfig::default())
    }

    #[tokio::test]
    async fn test_creator_without_handle_is_not_enriched() {
        let provider = StubProvider::new(
            json!([{"wallet": "A", "royaltyBps": 100}]),
            json!([]),
        );
        let aggregator = service(provider);

        let report = aggregator.report("Mint111").await.unwrap();
        assert_eq!(report.creators.len(), 1);
        assert!(report.creators[0].profile.is_none());
        assert!(report.creators[0].activity.is_none());
    }

    #[tokio::test]
    async fn test_repeated_handle_hits_cache() {
        let provider = Arc::new(StubProvider::new(
            json!([{"wallet": "A", "royaltyBps": 100, "provider": "twitter", "providerUsername": "alice"}]),
            json!([]),
        ));
        let aggregator =
            CreatorAggregator::new(provider.clone(), AggregatorConfig::default());

        aggregator.report("Mint111").await.unwrap();
        aggregator.report("Mint111").await.unwrap();
        assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_creator_list_fails_report() {
        let provider = StubProvider::new(json!({"unexpected": "shape"}), json!([]));
        let aggregator = service(provider);

        let err = aggregator.report("Mint111").await.unwrap_err();
        assert!(matches!(err, AggregatorError::MalformedInput(_)));
    }

    #[tokio::test]
    async fn test_claim_stats_filters_zero_royalty() {
        let provider = StubProvider::new(
            json!([]),
            json!([
                {"wallet": "A", "royaltyBps": 0},
                {"wallet": "B", "royaltyBps": 250},
                {"wallet": "C"}
            ]),
        );
        let aggregator = service(provider);

        let claims = aggregator.claim_stats("Mint111").await.unwrap();
        let wallets: Vec<&str> = claims.iter().map(|c| c.wallet.as_str()).collect();
        assert_eq!(wallets, vec!["B", "C"]);
    }
}
