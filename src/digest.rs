//! The four tool operations, independent of any serving runtime.
//!
//! Each search runs the same pipeline: one fetch, then (RSS only) the
//! announcement-type filter, then normalization, then (keyword search only)
//! the keyword matcher. Entry order is preserved end to end.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, SessionConfig};
use crate::models::{FeedMode, FeedQuery, PaperRecord, RawEntry};
use crate::sources::{ArxivApiSource, ArxivRssSource, FeedSource, FetchError};
use crate::utils::{matches_keyword, should_keep};

/// Errors surfaced by a tool operation
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// The operations exposed to the host runtime
///
/// Session configuration is passed in on every call and never modified.
#[async_trait]
pub trait DigestTools: Send + Sync + std::fmt::Debug {
    /// Greet someone, in pirate if the session asks for it
    fn hello(&self, name: &str, session: &SessionConfig) -> String;

    /// Newest `session.num_papers` submissions in a category via the search API
    async fn search_arxiv(
        &self,
        category: &str,
        session: &SessionConfig,
    ) -> Result<Vec<PaperRecord>, DigestError>;

    /// Today's new and cross-listed postings in a category via RSS
    async fn fetch_current_arxiv_postings_rss(
        &self,
        category: &str,
        session: &SessionConfig,
    ) -> Result<Vec<PaperRecord>, DigestError>;

    /// Today's new and cross-listed postings whose title or summary contains `keyword`
    async fn keyword_search_arxiv_rss(
        &self,
        category: &str,
        keyword: &str,
        session: &SessionConfig,
    ) -> Result<Vec<PaperRecord>, DigestError>;
}

/// Build the greeting for a name
pub fn greeting(name: &str, pirate_mode: bool) -> String {
    if pirate_mode {
        format!("Ahoy, {}!", name)
    } else {
        format!("Hello, {}!", name)
    }
}

/// [`DigestTools`] backed by an API source and an RSS source
#[derive(Debug, Clone)]
pub struct ArxivDigest {
    api: Arc<dyn FeedSource>,
    rss: Arc<dyn FeedSource>,
}

impl ArxivDigest {
    /// Create a digest over arbitrary sources
    pub fn new(api: Arc<dyn FeedSource>, rss: Arc<dyn FeedSource>) -> Self {
        Self { api, rss }
    }

    /// Create a digest talking to arXiv with the configured endpoints
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(
            Arc::new(ArxivApiSource::new(&config.http, &config.feeds)?),
            Arc::new(ArxivRssSource::new(&config.http, &config.feeds)?),
        ))
    }

    async fn run(
        &self,
        source: &Arc<dyn FeedSource>,
        query: FeedQuery,
    ) -> Result<Vec<PaperRecord>, DigestError> {
        let entries = source.fetch(&query).await?;
        let fetched = entries.len();
        let records = assemble(entries, source.mode(), query.keyword.as_deref());

        tracing::debug!(
            source = source.id(),
            category = %query.category,
            fetched,
            returned = records.len(),
            "digest pipeline finished"
        );

        Ok(records)
    }
}

/// Filter, normalize and match entries, keeping their order
///
/// Malformed entries are logged and skipped; they never fail the call.
fn assemble(entries: Vec<RawEntry>, mode: FeedMode, keyword: Option<&str>) -> Vec<PaperRecord> {
    entries
        .into_iter()
        .filter(|entry| match mode {
            FeedMode::Api => true,
            FeedMode::Rss => match should_keep(entry) {
                Ok(keep) => keep,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed feed entry");
                    false
                }
            },
        })
        .filter_map(|entry| match PaperRecord::from_raw(entry, mode) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed feed entry");
                None
            }
        })
        .filter(|record| keyword.map_or(true, |k| matches_keyword(record, k)))
        .collect()
}

#[async_trait]
impl DigestTools for ArxivDigest {
    fn hello(&self, name: &str, session: &SessionConfig) -> String {
        greeting(name, session.pirate_mode)
    }

    async fn search_arxiv(
        &self,
        category: &str,
        session: &SessionConfig,
    ) -> Result<Vec<PaperRecord>, DigestError> {
        let query = FeedQuery::new(category).max_results(session.num_papers);
        self.run(&self.api, query).await
    }

    async fn fetch_current_arxiv_postings_rss(
        &self,
        category: &str,
        _session: &SessionConfig,
    ) -> Result<Vec<PaperRecord>, DigestError> {
        self.run(&self.rss, FeedQuery::new(category)).await
    }

    async fn keyword_search_arxiv_rss(
        &self,
        category: &str,
        keyword: &str,
        _session: &SessionConfig,
    ) -> Result<Vec<PaperRecord>, DigestError> {
        self.run(&self.rss, FeedQuery::new(category).keyword(keyword))
            .await
    }
}
