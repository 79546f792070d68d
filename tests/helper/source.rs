//! In-memory release source for testing

use std::sync::Mutex;

use async_trait::async_trait;

use release_channels::release::error::SourceError;
use release_channels::release::source::ReleaseSource;
use release_channels::release::types::{Page, ReleaseEntry, TagEntry};

/// A request recorded by [`FakeSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCall {
    Releases(u32),
    Tags(u32),
}

/// Serves predefined pages of releases and tags.
///
/// Page N is the N-th page added; every page but the last links to the next.
#[derive(Default)]
pub struct FakeSource {
    release_pages: Vec<Vec<String>>,
    tag_pages: Vec<Vec<(String, String)>>,
    failing_release_page: Option<u32>,
    failing_tag_page: Option<u32>,
    hang_on_tags: bool,
    calls: Mutex<Vec<SourceCall>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release_page(mut self, tags: &[&str]) -> Self {
        self.release_pages
            .push(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_tag_page(mut self, tags: &[(&str, &str)]) -> Self {
        self.tag_pages.push(
            tags.iter()
                .map(|(name, sha)| (name.to_string(), sha.to_string()))
                .collect(),
        );
        self
    }

    pub fn failing_release_page(mut self, page: u32) -> Self {
        self.failing_release_page = Some(page);
        self
    }

    pub fn failing_tag_page(mut self, page: u32) -> Self {
        self.failing_tag_page = Some(page);
        self
    }

    /// Tag requests never complete
    pub fn hanging_on_tags(mut self) -> Self {
        self.hang_on_tags = true;
        self
    }

    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: SourceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn serve<T: Clone>(pages: &[Vec<T>], page: u32) -> Page<T> {
    let index = page as usize - 1;
    let items = pages.get(index).cloned().unwrap_or_default();
    if index + 1 < pages.len() {
        Page::new(items, page + 1)
    } else {
        Page::last(items)
    }
}

fn failure(page: u32) -> SourceError {
    SourceError::InvalidResponse(format!("page {page} unavailable"))
}

#[async_trait]
impl ReleaseSource for FakeSource {
    async fn list_releases(
        &self,
        _owner: &str,
        _repo: &str,
        page: u32,
        _per_page: u32,
    ) -> Result<Page<ReleaseEntry>, SourceError> {
        self.record(SourceCall::Releases(page));
        if self.failing_release_page == Some(page) {
            return Err(failure(page));
        }

        let page = serve(&self.release_pages, page);
        Ok(Page {
            items: page.items.into_iter().map(ReleaseEntry::new).collect(),
            next_page: page.next_page,
        })
    }

    async fn list_tags(
        &self,
        _owner: &str,
        _repo: &str,
        page: u32,
        _per_page: u32,
    ) -> Result<Page<TagEntry>, SourceError> {
        self.record(SourceCall::Tags(page));
        if self.hang_on_tags {
            std::future::pending::<()>().await;
        }
        if self.failing_tag_page == Some(page) {
            return Err(failure(page));
        }

        let page = serve(&self.tag_pages, page);
        Ok(Page {
            items: page
                .items
                .into_iter()
                .map(|(name, sha)| TagEntry::new(name, sha))
                .collect(),
            next_page: page.next_page,
        })
    }
}
