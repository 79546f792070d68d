use thiserror::Error;

use crate::release::types::ReleaseSet;

/// Failure of a single listing request
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Some winning tags were not found in the tag listing. `releases` holds
    /// every tag that was found; commits are empty for the `missing` tags.
    #[error("Unable to find commit for releases: {}", .missing.join(", "))]
    CommitNotFound {
        releases: ReleaseSet,
        missing: Vec<String>,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,
}
