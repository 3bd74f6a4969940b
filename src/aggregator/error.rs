//! Error taxonomy for the aggregation pipeline.
//!
//! Only malformed source lists and upstream launchpad failures surface as
//! hard errors. Per-creator enrichment failures are recovered in the service
//! layer and individual field parse failures degrade to documented defaults.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregatorError {
    /// A required input collection is not the expected shape. Fails the
    /// whole merge, not recoverable locally.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A per-creator lookup failed or timed out. Recovered by the caller
    /// with defaults for that one record only.
    #[error("enrichment unavailable for {handle}: {reason}")]
    EnrichmentUnavailable { handle: String, reason: String },

    /// An upstream API responded, but unusably (bad status, unsuccessful
    /// envelope, undecodable body).
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type AggregatorResult<T> = Result<T, AggregatorError>;
