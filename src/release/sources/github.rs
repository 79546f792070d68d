//! GitHub REST API source implementation

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{GitHubConfig, USER_AGENT};
use crate::release::error::SourceError;
use crate::release::source::ReleaseSource;
use crate::release::types::{Page, ReleaseEntry, TagEntry};

/// REST API version requested from GitHub
const API_VERSION: &str = "2022-11-28";

/// Response item from the GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Response item from the GitHub Tags API
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
    commit: TagCommit,
}

#[derive(Debug, Deserialize)]
struct TagCommit {
    sha: String,
}

/// Source implementation for the GitHub REST API
pub struct GitHubSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubSource {
    /// Creates an unauthenticated GitHubSource with a custom base URL
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::from_config(&GitHubConfig {
            base_url: base_url.to_string(),
            ..GitHubConfig::default()
        })
    }

    pub fn from_config(config: &GitHubConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
        })
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        owner: &str,
        repo: &str,
        endpoint: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<T>, SourceError> {
        let url = format!(
            "{}/repos/{}/{}/{}?per_page={}&page={}",
            self.base_url, owner, repo, endpoint, per_page, page
        );

        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!("{}/{}", owner, repo)));
        }

        if is_rate_limited(status, response.headers()) {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(SourceError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let next_page = next_page(response.headers());

        let items: Vec<T> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub {} response: {}", endpoint, e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        debug!(
            "GitHub {} page {} for {}/{}: {} items, next page {:?}",
            endpoint,
            page,
            owner,
            repo,
            items.len(),
            next_page
        );

        Ok(Page { items, next_page })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubSource {
    async fn list_releases(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<ReleaseEntry>, SourceError> {
        let page = self
            .fetch_page::<Release>(owner, repo, "releases", page, per_page)
            .await?;

        Ok(Page {
            items: page
                .items
                .into_iter()
                .map(|r| ReleaseEntry::new(r.tag_name))
                .collect(),
            next_page: page.next_page,
        })
    }

    async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<TagEntry>, SourceError> {
        let page = self
            .fetch_page::<Tag>(owner, repo, "tags", page, per_page)
            .await?;

        Ok(Page {
            items: page
                .items
                .into_iter()
                .map(|t| TagEntry::new(t.name, t.commit.sha))
                .collect(),
            next_page: page.next_page,
        })
    }
}

/// GitHub signals an exhausted rate limit with 429, or with 403 and no
/// remaining requests.
fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && headers
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim() == "0"))
}

fn next_page(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(header::LINK)?.to_str().ok()?;
    parse_next_page(link)
}

/// Parse the page number of the `rel="next"` entry of a Link header.
/// GitHub uses: `<url?per_page=100&page=N>; rel="next", <url?page=M>; rel="last"`.
/// Returns None if there is no "next" link (i.e., this is the last page).
fn parse_next_page(link: &str) -> Option<u32> {
    let part = link.split(',').find(|part| part.contains("rel=\"next\""))?;
    let url = part
        .split(';')
        .next()?
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>');
    url.split_once('?')?
        .1
        .split('&')
        .find_map(|param| param.strip_prefix("page="))
        .and_then(|page| page.parse().ok())
}
