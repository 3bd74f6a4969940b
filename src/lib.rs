//! creatorscope - Token-launch creator aggregation and social enrichment
//!
//! This crate merges on-chain token-launch creator data with claim statistics
//! into one record per wallet, enriches each creator with social profile and
//! activity data, and classifies search results into network suggestions.

pub mod aggregator;
pub mod types;

// Re-export main types for convenience
pub use aggregator::{AggregatorBuilder, AggregatorConfig, CreatorAggregator, CreatorReport};
pub use types::Wallet;
