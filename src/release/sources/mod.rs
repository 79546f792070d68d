//! Source implementations for listing releases and tags

pub mod github;

pub use github::GitHubSource;
