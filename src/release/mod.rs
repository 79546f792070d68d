//! Release channel resolution for source-code hosting repositories
//!
//! This module determines the greatest stable release, the greatest
//! release candidate or beta, and the greatest alpha build of a repository,
//! each resolved to the commit its tag points to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│ Classifier  │────▶│   Commits   │
//! │ (releases)  │     │  (reduce)   │     │  (resolve)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   ▲
//!                            ▼                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Semver    │     │   Source    │
//!                     │ (precedence)│     │   (tags)    │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: `ReleaseResolver`, the public entry point
//! - [`classifier`]: folds tags into per-channel winners
//! - [`commits`]: resolves commits for the winning tags
//! - [`channel`]: stable / latest / edge classification of pre-release labels
//! - [`semver`]: tag validation and precedence
//! - [`pagination`]: bounded page walk shared by both listings
//! - [`context`]: cancellation and deadlines
//! - [`source`]: trait for listing releases and tags
//! - [`sources`]: concrete source implementations (GitHub)
//! - [`error`]: error types
//! - [`types`]: `Release`, `ReleaseSet` and listing records

pub mod channel;
pub mod classifier;
pub mod commits;
pub mod context;
pub mod error;
pub mod pagination;
pub mod resolver;
pub mod semver;
pub mod source;
pub mod sources;
pub mod types;

pub use channel::Channel;
pub use context::{CancelHandle, Context};
pub use error::{ReleaseError, SourceError};
pub use resolver::ReleaseResolver;
pub use types::{Release, ReleaseSet};
