//! Search-result classifier.
//!
//! Deduplicates raw search hits by author and derives a short tag set per
//! author by keyword matching over the author's bio and collected hit texts.
//! A heuristic, deterministic classifier; it makes no claim of precision.

use crate::aggregator::types::SuggestedContact;
use crate::types::RawSearchHit;
use std::collections::HashMap;

/// Maximum distinct contacts returned per query.
pub const MAX_SUGGESTED_CONTACTS: usize = 5;
/// Maximum tags per contact.
pub const MAX_TAGS_PER_CONTACT: usize = 3;

const SNIPPET_LEN: usize = 50;
const SNIPPET_CAP: usize = 60;

/// Keyword groups checked in fixed order; a group contributes its tag when
/// any of its substrings occurs in the author's combined text.
const KEYWORD_TAGS: [(&[&str], &str); 8] = [
    (&["builder", "build"], "Builder"),
    (&["solana", "sol"], "Solana"),
    (&["developer", "dev"], "Developer"),
    (&["crypto", "web3"], "Crypto-native"),
    (&["ship", "shipping"], "Shipper"),
    (&["contract", "smart contract"], "Contracts"),
    (&["oss", "open source"], "OSS"),
    (&["community"], "Community"),
];

struct AuthorHits<'a> {
    display_name: String,
    avatar_url: Option<String>,
    description: Option<&'a str>,
    texts: Vec<&'a str>,
}

/// Classify raw search hits into at most 5 suggested contacts.
pub fn classify_search(hits: &[RawSearchHit]) -> Vec<SuggestedContact> {
    let mut order: Vec<&str> = Vec::new();
    let mut authors: HashMap<&str, AuthorHits<'_>> = HashMap::new();

    for hit in hits {
        let Some(author) = hit.user_info.as_ref() else {
            continue;
        };
        let handle = author.screen_name.as_str();

        let entry = authors.entry(handle).or_insert_with(|| {
            order.push(handle);
            AuthorHits {
                display_name: author
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| handle.to_string()),
                avatar_url: author.avatar.clone(),
                description: author.description.as_deref(),
                texts: Vec::new(),
            }
        });
        if let Some(text) = hit.text.as_deref() {
            entry.texts.push(text);
        }
    }

    order
        .into_iter()
        .take(MAX_SUGGESTED_CONTACTS)
        .map(|handle| {
            let author = &authors[handle];
            SuggestedContact {
                handle: handle.to_string(),
                display_name: author.display_name.clone(),
                avatar_url: author.avatar_url.clone(),
                reason: reason_snippet(author),
                tags: derive_tags(author),
            }
        })
        .collect()
}

/// Tags in fixed check order, truncated to 3; `["Builder", "Solana"]` when
/// nothing matches.
fn derive_tags(author: &AuthorHits<'_>) -> Vec<String> {
    let combined = format!(
        "{} {}",
        author.description.unwrap_or(""),
        author.texts.join(" ")
    )
    .to_lowercase();

    let mut tags: Vec<String> = KEYWORD_TAGS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| combined.contains(k)))
        .map(|(_, tag)| tag.to_string())
        .collect();

    if tags.is_empty() {
        tags.push("Builder".to_string());
        tags.push("Solana".to_string());
    }
    tags.truncate(MAX_TAGS_PER_CONTACT);
    tags
}

/// Excerpt of the author's first hit text (else bio, else a fixed phrase),
/// capped at 60 characters.
fn reason_snippet(author: &AuthorHits<'_>) -> String {
    let source = author
        .texts
        .first()
        .copied()
        .filter(|t| !t.is_empty())
        .or_else(|| author.description.filter(|d| !d.is_empty()));

    let reason = match source {
        Some(text) => format!("{}...", truncate_chars(text, SNIPPET_LEN)),
        None => "Active Solana builder".to_string(),
    };

    if reason.chars().count() > SNIPPET_CAP {
        format!("{}...", truncate_chars(&reason, SNIPPET_CAP - 3))
    } else {
        reason
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
