//! Commit resolution for the winning release tags

use std::collections::HashMap;
use std::ops::ControlFlow;

use tracing::{debug, warn};

use crate::release::channel::Channel;
use crate::release::context::Context;
use crate::release::error::ReleaseError;
use crate::release::pagination::{PageBudget, walk_pages};
use crate::release::source::ReleaseSource;
use crate::release::types::ReleaseSet;

/// Fill in the commit of every tagged release by scanning the tag listing.
///
/// Releases sharing a tag are looked up once and all receive the commit.
/// The scan stops as soon as every tag is resolved. Tags still unresolved
/// when the listing or the page budget runs out are reported through
/// [`ReleaseError::CommitNotFound`] together with the partial results.
pub async fn resolve_commits(
    ctx: &Context,
    source: &dyn ReleaseSource,
    owner: &str,
    repo: &str,
    budget: PageBudget,
    mut releases: ReleaseSet,
) -> Result<ReleaseSet, ReleaseError> {
    let mut outstanding: HashMap<String, Vec<Channel>> = HashMap::new();
    for (channel, release) in releases.iter() {
        if release.needs_commit() {
            outstanding
                .entry(release.tag.clone())
                .or_default()
                .push(channel);
        }
    }

    if outstanding.is_empty() {
        debug!("No commits to resolve for {}/{}", owner, repo);
        return Ok(releases);
    }

    walk_pages(
        ctx,
        budget,
        move |page, per_page| source.list_tags(owner, repo, page, per_page),
        |tag| {
            let Some(channels) = outstanding.remove(&tag.name) else {
                return ControlFlow::Continue(());
            };
            for channel in channels {
                releases.get_mut(channel).commit = tag.commit_sha.clone();
            }
            if outstanding.is_empty() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
    )
    .await?;

    if outstanding.is_empty() {
        return Ok(releases);
    }

    let mut missing: Vec<String> = outstanding.into_keys().collect();
    missing.sort();
    warn!(
        "Unable to find commits for {}/{}: {}",
        owner,
        repo,
        missing.join(", ")
    );
    Err(ReleaseError::CommitNotFound { releases, missing })
}
