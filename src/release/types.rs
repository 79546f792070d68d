//! Common types shared by the classifier, the commit resolver and sources

use serde::Serialize;

use crate::release::channel::Channel;

/// A version tag paired with the commit it points to.
///
/// An empty `tag` means no candidate was found; an empty `commit` means the
/// commit has not been resolved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Release {
    pub tag: String,
    pub commit: String,
}

impl Release {
    pub fn new(tag: impl Into<String>, commit: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            commit: commit.into(),
        }
    }

    /// Returns true if no tag has been found for this release
    pub fn is_empty(&self) -> bool {
        self.tag.is_empty()
    }

    /// Returns true if the release has a tag but no commit yet
    pub fn needs_commit(&self) -> bool {
        !self.tag.is_empty() && self.commit.is_empty()
    }
}

/// The stable, latest and edge releases of one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseSet {
    pub stable: Release,
    pub latest: Release,
    pub edge: Release,
}

impl ReleaseSet {
    pub fn get(&self, channel: Channel) -> &Release {
        match channel {
            Channel::Stable => &self.stable,
            Channel::Latest => &self.latest,
            Channel::Edge => &self.edge,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut Release {
        match channel {
            Channel::Stable => &mut self.stable,
            Channel::Latest => &mut self.latest,
            Channel::Edge => &mut self.edge,
        }
    }

    /// Iterates over the releases in channel order (stable, latest, edge)
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &Release)> {
        Channel::ALL
            .into_iter()
            .map(move |channel| (channel, self.get(channel)))
    }

    pub fn into_parts(self) -> (Release, Release, Release) {
        (self.stable, self.latest, self.edge)
    }
}

/// One page of a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of the next page, or None if this is the last one
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    /// A page followed by `next_page`
    pub fn new(items: Vec<T>, next_page: u32) -> Self {
        Self {
            items,
            next_page: Some(next_page),
        }
    }

    /// The final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page: None,
        }
    }
}

/// A published release as returned by the releases listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub tag_name: String,
}

impl ReleaseEntry {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
        }
    }
}

/// A git tag as returned by the tags listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub name: String,
    pub commit_sha: String,
}

impl TagEntry {
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }
}
