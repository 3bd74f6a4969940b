//! Timeline aggregator.
//!
//! Buckets timeline events into a trailing 7-day histogram of post and
//! engagement counts. Buckets are keyed by weekday label, not absolute date:
//! two dates a week apart that share a weekday sum into the same bucket.
//! That approximation matches the presentation layer this rollup feeds and
//! is kept deliberately.

use crate::aggregator::profile::parse_created_at;
use crate::aggregator::types::{ActivityHistogram, DayEngagement, DayPosts};
use crate::types::RawTimelineResponse;
use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use std::collections::HashMap;
use tracing::debug;

fn day_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

#[derive(Default, Clone, Copy)]
struct DayTotals {
    posts: u64,
    likes: u64,
    replies: u64,
}

/// Roll a raw timeline up into the trailing-7-day histogram.
///
/// The pinned event, when present, counts like any other event. Events with
/// missing or unparsable timestamps are skipped. Both output series hold
/// exactly 7 entries labeled `now-6d ..= now`, oldest first, zero-filled.
pub fn aggregate_timeline(response: &RawTimelineResponse, now: DateTime<Utc>) -> ActivityHistogram {
    let window_start = now - Duration::days(7);

    let mut totals: HashMap<&'static str, DayTotals> = HashMap::new();
    for offset in 0..7 {
        let date = now - Duration::days(offset);
        totals.insert(day_label(date.weekday()), DayTotals::default());
    }

    let events = response.pinned.iter().chain(response.timeline.iter());
    for event in events {
        let Some(ts) = event.created_at.as_deref().and_then(parse_created_at) else {
            debug!(created_at = ?event.created_at, "skipping event with unparsable timestamp");
            continue;
        };
        if ts < window_start || ts > now {
            continue;
        }

        let entry = totals.entry(day_label(ts.weekday())).or_default();
        entry.posts += 1;
        entry.likes += event.favorites.unwrap_or(0);
        entry.replies += event.replies.unwrap_or(0);
    }

    let mut posts_by_day = Vec::with_capacity(7);
    let mut engagement_by_day = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = now - Duration::days(offset);
        let label = day_label(date.weekday());
        let day = totals.get(label).copied().unwrap_or_default();

        posts_by_day.push(DayPosts {
            day: label.to_string(),
            posts: day.posts,
        });
        engagement_by_day.push(DayEngagement {
            day: label.to_string(),
            likes: day.likes,
            replies: day.replies,
        });
    }

    ActivityHistogram {
        posts_by_day,
        engagement_by_day,
    }
}
