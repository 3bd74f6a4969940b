//! Profile transformer.
//!
//! Maps a raw social-profile payload into a normalized [`ProfileRecord`],
//! deriving account age, posting cadence and an activity tier. The transform
//! is total: it never fails, any unparsable optional field degrades to its
//! documented default.

use crate::aggregator::types::{ActivityTier, ProfileRecord};
use crate::types::RawProfile;
use chrono::{DateTime, Utc};
use tracing::debug;

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 60.0 * 60.0;

/// Parse a provider timestamp. The social API uses the classic
/// "Wed Oct 10 20:19:24 +0000 2018" layout; RFC 3339 and RFC 2822 are
/// accepted as fallbacks.
pub(crate) fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    None
}

/// Transform a raw profile payload into a normalized record.
///
/// `fallback_handle` backs the handle and display-name chains when the
/// payload omits them; `existing_avatar` is a caller-supplied avatar that
/// takes priority over the provider's own. `now` is explicit so cadence
/// derivation is deterministic under test.
pub fn transform_profile(
    raw: &RawProfile,
    fallback_handle: Option<&str>,
    existing_avatar: Option<&str>,
    now: DateTime<Utc>,
) -> ProfileRecord {
    let profile = non_empty(raw.profile.as_deref());
    let fallback = non_empty(fallback_handle);

    let handle = profile.or(fallback).unwrap_or("unknown").to_string();
    let display_name = non_empty(raw.name.as_deref())
        .or(profile)
        .or(fallback)
        .unwrap_or("Unknown")
        .to_string();
    let avatar_url = non_empty(existing_avatar)
        .or_else(|| non_empty(raw.avatar.as_deref()))
        .map(str::to_string);
    let bio = non_empty(raw.desc.as_deref())
        .unwrap_or("No bio available")
        .to_string();

    let created_at = raw.created_at.as_deref().and_then(|s| {
        let parsed = parse_created_at(s);
        if parsed.is_none() {
            debug!(created_at = s, "unparsable account creation time");
        }
        parsed
    });
    let account_age = created_at
        .map(|dt| format!("Since {}", dt.format("%Y")))
        .unwrap_or_else(|| "Unknown".to_string());

    let posts_per_week = posts_per_week(raw.statuses_count.unwrap_or(0), created_at, now);

    ProfileRecord {
        handle,
        display_name,
        avatar_url,
        bio,
        location: non_empty(raw.location.as_deref()).map(str::to_string),
        followers: raw.sub_count.unwrap_or(0),
        following: raw.friends.unwrap_or(0),
        media_count: raw.media_count.unwrap_or(0),
        post_count: raw.statuses_count.unwrap_or(0),
        account_age,
        posts_per_week,
        activity: ActivityTier::from_posts_per_week(posts_per_week),
        is_verified: raw.blue_verified == Some(true),
        is_protected: raw.protected == Some(true),
    }
}

/// Average posts per week over the account's lifetime.
///
/// Without a creation time the cadence is approximated as post count / 100.
/// Accounts younger than one week report their raw post count so the
/// division cannot blow up.
fn posts_per_week(post_count: u64, created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    if post_count == 0 {
        return 0;
    }
    let Some(created) = created_at else {
        return (post_count as f64 / 100.0).round() as u64;
    };

    let elapsed_weeks = (now - created).num_seconds() as f64 / SECONDS_PER_WEEK;
    if elapsed_weeks < 1.0 {
        post_count
    } else {
        (post_count as f64 / elapsed_weeks).round() as u64
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
