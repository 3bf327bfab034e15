//! arXiv feed fetchers.
//!
//! A [`FeedSource`] turns a [`FeedQuery`] into the raw entries of one feed or
//! query result. Two transports exist:
//!
//! - [`ArxivApiSource`]: the Atom search API, newest submissions first, capped
//!   at the query's result count
//! - [`ArxivRssSource`]: the category's daily RSS feed, every entry, in feed order
//!
//! Fetching is all-or-nothing: the whole payload is read and parsed before any
//! entry is handed out, and nothing is retried.

mod arxiv;
pub mod mock;
mod rss;

pub use arxiv::ArxivApiSource;
pub use mock::MockSource;
pub use rss::ArxivRssSource;

use async_trait::async_trait;

use crate::models::{FeedMode, FeedQuery, RawEntry};

/// Interface every arXiv transport implements
#[async_trait]
pub trait FeedSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Which transport the entries come from
    fn mode(&self) -> FeedMode;

    /// Fetch the entries for a query with exactly one network read
    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<RawEntry>, FetchError>;
}

/// Errors that can occur when retrieving a feed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (XML, Atom, RSS)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error reported by arXiv (non-success status or an API error entry)
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}
