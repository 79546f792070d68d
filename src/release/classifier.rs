//! Classification of tags into channels and per-channel maximum tracking

use std::cmp::Ordering;

use tracing::trace;

use crate::release::channel::Channel;
use crate::release::semver::{compare, parse_tag};
use crate::release::types::ReleaseSet;

/// Folds tags one at a time into the greatest stable, latest and edge tag.
///
/// After every fold `edge >= latest >= stable` holds, so tags can arrive in
/// any order and only the three current winners are kept in memory.
#[derive(Debug, Clone, Default)]
pub struct ChannelReducer {
    releases: ReleaseSet,
}

impl ChannelReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single tag into the running winners.
    ///
    /// Returns the channel the tag was classified into, or None if the tag
    /// is not a valid semantic version or has an unrecognized pre-release label.
    pub fn fold(&mut self, tag: &str) -> Option<Channel> {
        let Some(version) = parse_tag(tag) else {
            trace!("Skipping non-semver tag {}", tag);
            return None;
        };

        let channel = Channel::classify(version.pre.as_str());
        match channel {
            Some(channel) => {
                let winner = self.releases.get_mut(channel);
                if compare(tag, &winner.tag) == Ordering::Greater {
                    winner.tag = tag.to_string();
                }
            }
            None => trace!("Ignoring tag {} with unrecognized pre-release label", tag),
        }

        self.enforce_monotonic();
        channel
    }

    /// Current winners
    pub fn releases(&self) -> &ReleaseSet {
        &self.releases
    }

    pub fn finish(self) -> ReleaseSet {
        self.releases
    }

    // latest must never trail stable, and edge must never trail latest
    fn enforce_monotonic(&mut self) {
        let releases = &mut self.releases;
        if compare(&releases.latest.tag, &releases.stable.tag) == Ordering::Less {
            releases.latest.tag = releases.stable.tag.clone();
        }
        if compare(&releases.edge.tag, &releases.latest.tag) == Ordering::Less {
            releases.edge.tag = releases.latest.tag.clone();
        }
    }
}

/// Classify every tag and return the winning stable, latest and edge tags.
/// Commits are left empty.
pub fn classify_and_reduce<I, S>(tags: I) -> ReleaseSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reducer = ChannelReducer::new();
    for tag in tags {
        reducer.fold(tag.as_ref());
    }
    reducer.finish()
}
