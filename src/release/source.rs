//! Source trait for listing a repository's releases and tags

#[cfg(test)]
use mockall::automock;

use crate::release::error::SourceError;
use crate::release::types::{Page, ReleaseEntry, TagEntry};

/// Trait for fetching paginated release and tag listings from a hosting provider
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches one page of published releases
    ///
    /// # Arguments
    /// * `owner` - Repository owner (e.g., "kubernetes")
    /// * `repo` - Repository name (e.g., "minikube")
    /// * `page` - Page number, starting at 1
    /// * `per_page` - Number of items requested per page
    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<ReleaseEntry>, SourceError>;

    /// Fetches one page of git tags with the commit each one points to
    async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<TagEntry>, SourceError>;
}
