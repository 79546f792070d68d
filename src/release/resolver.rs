//! Public entry point: resolve the stable, latest and edge releases of a repository

use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::release::classifier::ChannelReducer;
use crate::release::commits::resolve_commits;
use crate::release::context::Context;
use crate::release::error::{ReleaseError, SourceError};
use crate::release::pagination::{PageBudget, walk_pages};
use crate::release::semver::is_valid;
use crate::release::source::ReleaseSource;
use crate::release::sources::GitHubSource;
use crate::release::types::ReleaseSet;

/// Resolves release channels through a [`ReleaseSource`].
///
/// Holds no per-call state, so one resolver can serve concurrent calls for
/// different repositories.
#[derive(Clone)]
pub struct ReleaseResolver {
    source: Arc<dyn ReleaseSource>,
    budget: PageBudget,
}

impl ReleaseResolver {
    /// Creates a resolver with the default page budget
    pub fn new(source: Arc<dyn ReleaseSource>) -> Self {
        Self::with_budget(source, PageBudget::default())
    }

    pub fn with_budget(source: Arc<dyn ReleaseSource>, budget: PageBudget) -> Self {
        Self { source, budget }
    }

    /// Creates a resolver backed by the GitHub REST API
    pub fn github(config: &GitHubConfig) -> Result<Self, SourceError> {
        Ok(Self::new(Arc::new(GitHubSource::from_config(config)?)))
    }

    /// Returns the greatest stable release, the greatest rc/beta pre-release
    /// and the greatest alpha build, each with the commit its tag points to.
    ///
    /// `latest` is never below `stable` and `edge` is never below `latest`:
    /// when no newer pre-release exists the lower channel's tag is used.
    ///
    /// # Errors
    /// * `ReleaseError::Source` - a listing request failed
    /// * `ReleaseError::CommitNotFound` - some tag was not found in the tag
    ///   listing; the error carries the partially resolved releases
    /// * `ReleaseError::Cancelled` / `ReleaseError::DeadlineExceeded`
    pub async fn get_releases(
        &self,
        ctx: &Context,
        owner: &str,
        repo: &str,
    ) -> Result<ReleaseSet, ReleaseError> {
        let releases = self.collect_tags(ctx, owner, repo).await?;
        debug!(
            "Winning tags for {}/{}: stable={:?} latest={:?} edge={:?}",
            owner, repo, releases.stable.tag, releases.latest.tag, releases.edge.tag
        );

        let releases =
            resolve_commits(ctx, self.source.as_ref(), owner, repo, self.budget, releases)
                .await?;
        info!(
            "Resolved releases for {}/{}: stable={} latest={} edge={}",
            owner, repo, releases.stable.tag, releases.latest.tag, releases.edge.tag
        );
        Ok(releases)
    }

    /// Returns the stable release tag, or an empty string if the repository
    /// has no stable release.
    ///
    /// A missing commit is only reported when the stable tag itself is valid;
    /// without a stable release the result is an empty string either way.
    pub async fn stable_version(
        &self,
        ctx: &Context,
        owner: &str,
        repo: &str,
    ) -> Result<String, ReleaseError> {
        match self.get_releases(ctx, owner, repo).await {
            Ok(releases) if is_valid(&releases.stable.tag) => Ok(releases.stable.tag),
            Ok(_) => Ok(String::new()),
            Err(ReleaseError::CommitNotFound { releases, .. })
                if !is_valid(&releases.stable.tag) =>
            {
                Ok(String::new())
            }
            Err(err) => Err(err),
        }
    }

    async fn collect_tags(
        &self,
        ctx: &Context,
        owner: &str,
        repo: &str,
    ) -> Result<ReleaseSet, ReleaseError> {
        let source = self.source.as_ref();
        let mut reducer = ChannelReducer::new();

        walk_pages(
            ctx,
            self.budget,
            move |page, per_page| source.list_releases(owner, repo, page, per_page),
            |release| {
                reducer.fold(&release.tag_name);
                ControlFlow::Continue(())
            },
        )
        .await?;

        Ok(reducer.finish())
    }
}
