//! arXiv search API source.

use async_trait::async_trait;
use feed_rs::parser;

use crate::config::{FeedEndpoints, HttpConfig};
use crate::models::{FeedMode, FeedQuery, Published, RawEntry};
use crate::sources::{FeedSource, FetchError};
use crate::utils::HttpClient;

/// Largest page the arXiv API serves in one request
const ARXIV_MAX_RESULTS: usize = 2000;

/// Marker in the id of the entry arXiv returns instead of results on a bad query
const ARXIV_ERROR_ID: &str = "/api/errors";

/// arXiv search API source
///
/// Queries `cat:<category>` sorted by submission date, newest first.
#[derive(Debug, Clone)]
pub struct ArxivApiSource {
    client: HttpClient,
    api_url: String,
}

impl ArxivApiSource {
    /// Create a new API source
    pub fn new(http: &HttpConfig, feeds: &FeedEndpoints) -> Result<Self, FetchError> {
        Ok(Self::with_client(HttpClient::new(http)?, &feeds.api_url))
    }

    /// Create with a custom HTTP client and endpoint (for testing)
    pub fn with_client(client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Build the request URL for a query
    fn build_url(&self, query: &FeedQuery) -> String {
        let max_results = query.effective_max_results().min(ARXIV_MAX_RESULTS);
        format!(
            "{}?search_query={}&start=0&max_results={}&sortBy=submittedDate&sortOrder=descending",
            self.api_url,
            urlencoding::encode(&format!("cat:{}", query.category)),
            max_results
        )
    }

    /// Parse an Atom payload into raw entries
    fn parse_feed(payload: &[u8], max_results: usize) -> Result<Vec<RawEntry>, FetchError> {
        let feed = parser::parse(payload)
            .map_err(|e| FetchError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        if let Some(error) = feed.entries.iter().find(|e| e.id.contains(ARXIV_ERROR_ID)) {
            let message = error
                .summary
                .as_ref()
                .map(|s| s.content.trim().to_string())
                .unwrap_or_else(|| error.id.clone());
            return Err(FetchError::Api(message));
        }

        Ok(feed
            .entries
            .into_iter()
            .take(max_results)
            .map(Self::parse_entry)
            .collect())
    }

    /// Map an Atom entry to a raw entry
    fn parse_entry(entry: feed_rs::model::Entry) -> RawEntry {
        let link = if entry.id.is_empty() {
            entry.links.first().map(|l| l.href.clone())
        } else {
            Some(entry.id)
        };

        RawEntry {
            title: entry.title.map(|t| t.content),
            summary: entry.summary.map(|s| s.content),
            authors: entry.authors.into_iter().map(|a| a.name).collect(),
            link,
            announce_type: None,
            published: entry.published.map(Published::Instant),
        }
    }
}

#[async_trait]
impl FeedSource for ArxivApiSource {
    fn id(&self) -> &str {
        "arxiv-api"
    }

    fn mode(&self) -> FeedMode {
        FeedMode::Api
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<RawEntry>, FetchError> {
        let url = self.build_url(query);
        let payload = self
            .client
            .get_bytes(&url, "application/atom+xml")
            .await?;

        let max_results = query.effective_max_results().min(ARXIV_MAX_RESULTS);
        let entries = Self::parse_feed(&payload, max_results)?;

        tracing::debug!(
            category = %query.category,
            entries = entries.len(),
            "arXiv API query complete"
        );

        Ok(entries)
    }
}
