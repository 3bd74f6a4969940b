//! Creator merge engine.
//!
//! Reconciles the two independently keyed launchpad collections (creator
//! identities and claim statistics) into one record per wallet. Identity
//! fields win; claim stats only fill gaps, except the claimed amount and the
//! provider-specific social-username rule.

use crate::aggregator::error::{AggregatorError, AggregatorResult};
use crate::aggregator::types::CreatorRecord;
use crate::types::{RawClaimStat, RawCreatorIdentity};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Provider name that marks a provider username as a social handle.
const SOCIAL_PROVIDER: &str = "twitter";

/// Parse a raw identity list, failing on anything that is not an array of
/// objects carrying a wallet.
pub fn parse_identity_list(value: &Value) -> AggregatorResult<Vec<RawCreatorIdentity>> {
    let items = value.as_array().ok_or_else(|| {
        AggregatorError::MalformedInput("creator identity list is not an array".to_string())
    })?;

    items
        .iter()
        .map(|item| {
            let record: RawCreatorIdentity =
                serde_json::from_value(item.clone()).map_err(|e| {
                    AggregatorError::MalformedInput(format!("creator identity entry: {}", e))
                })?;
            if record.wallet.is_empty() {
                return Err(AggregatorError::MalformedInput(
                    "creator identity entry has an empty wallet".to_string(),
                ));
            }
            Ok(record)
        })
        .collect()
}

/// Parse a raw claim-stat list, with the same shape requirements as
/// [`parse_identity_list`].
pub fn parse_claim_list(value: &Value) -> AggregatorResult<Vec<RawClaimStat>> {
    let items = value.as_array().ok_or_else(|| {
        AggregatorError::MalformedInput("claim-stats list is not an array".to_string())
    })?;

    items
        .iter()
        .map(|item| {
            let record: RawClaimStat = serde_json::from_value(item.clone()).map_err(|e| {
                AggregatorError::MalformedInput(format!("claim-stats entry: {}", e))
            })?;
            if record.wallet.is_empty() {
                return Err(AggregatorError::MalformedInput(
                    "claim-stats entry has an empty wallet".to_string(),
                ));
            }
            Ok(record)
        })
        .collect()
}

/// Merge identities and claim stats into one record per distinct wallet.
///
/// The output keeps identity-list order first, then claim-only wallets in
/// first-seen order. Duplicate wallets within one source list are last-write
/// wins. With `filter_zero_royalty`, entries whose royalty is exactly zero
/// are dropped from both inputs before merging; entries without a royalty
/// field pass the filter.
pub fn merge_creators(
    identities: &[RawCreatorIdentity],
    claims: &[RawClaimStat],
    filter_zero_royalty: bool,
) -> Vec<CreatorRecord> {
    let keep = |royalty_bps: Option<u32>| !filter_zero_royalty || royalty_bps != Some(0);

    let mut records: Vec<CreatorRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for identity in identities.iter().filter(|i| keep(i.royalty_bps)) {
        let record = CreatorRecord {
            wallet: identity.wallet.clone(),
            username: identity.username.clone(),
            avatar_url: identity.pfp.clone(),
            royalty_bps: identity.royalty_bps.unwrap_or(0),
            is_creator: identity.is_creator,
            provider: identity.provider.clone(),
            provider_username: identity.provider_username.clone(),
            total_claimed_lamports: None,
            social_username: None,
        };
        match index.get(&identity.wallet) {
            Some(&pos) => records[pos] = record,
            None => {
                index.insert(identity.wallet.clone(), records.len());
                records.push(record);
            }
        }
    }

    for claim in claims.iter().filter(|c| keep(c.royalty_bps)) {
        let claimed = claim.total_claimed.as_ref().and_then(parse_claimed);
        let tagged_social = claim
            .provider
            .as_deref()
            .is_some_and(|p| p == SOCIAL_PROVIDER)
            .then(|| claim.provider_username.clone())
            .flatten()
            .filter(|u| !u.is_empty());

        match index.get(&claim.wallet) {
            Some(&pos) => {
                let existing = &mut records[pos];
                existing.total_claimed_lamports = claimed;
                if existing
                    .provider_username
                    .as_deref()
                    .map_or(true, str::is_empty)
                {
                    if let Some(username) = claim
                        .provider_username
                        .as_deref()
                        .filter(|u| !u.is_empty())
                    {
                        existing.provider_username = Some(username.to_string());
                    }
                }
                if let Some(social) = tagged_social {
                    existing.social_username = Some(social);
                }
            }
            None => {
                let record = CreatorRecord {
                    wallet: claim.wallet.clone(),
                    username: claim.username.clone(),
                    avatar_url: claim.pfp.clone(),
                    royalty_bps: claim.royalty_bps.unwrap_or(0),
                    is_creator: claim.is_creator,
                    provider: claim.provider.clone(),
                    provider_username: claim.provider_username.clone(),
                    total_claimed_lamports: claimed,
                    social_username: tagged_social,
                };
                index.insert(claim.wallet.clone(), records.len());
                records.push(record);
            }
        }
    }

    records
}

/// Parse a claimed amount the provider serializes as a decimal string
/// (occasionally a bare number). Unparsable values degrade to `None`.
fn parse_claimed(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::String(s) => s.parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    };
    if parsed.is_none() {
        debug!(?value, "unparsable claimed amount, dropping field");
    }
    parsed
}
