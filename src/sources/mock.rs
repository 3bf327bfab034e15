//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::{FeedMode, FeedQuery, RawEntry};
use crate::sources::{FeedSource, FetchError};

/// A mock source for testing that returns predefined entries.
#[derive(Debug)]
pub struct MockSource {
    mode: FeedMode,
    entries: Mutex<Option<Vec<RawEntry>>>,
    failure: Mutex<Option<String>>,
    queries: Mutex<Vec<FeedQuery>>,
}

impl MockSource {
    /// Create a new mock source with no entries.
    pub fn new(mode: FeedMode) -> Self {
        Self {
            mode,
            entries: Mutex::new(None),
            failure: Mutex::new(None),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock source that will return the given entries.
    pub fn with_entries(mode: FeedMode, entries: Vec<RawEntry>) -> Self {
        let source = Self::new(mode);
        source.set_entries(entries);
        source
    }

    /// Set the entries to return.
    pub fn set_entries(&self, entries: Vec<RawEntry>) {
        let mut guard = self.entries.lock().unwrap();
        *guard = Some(entries);
    }

    /// Make every fetch fail with a network error.
    pub fn fail_with(&self, message: impl Into<String>) {
        let mut guard = self.failure.lock().unwrap();
        *guard = Some(message.into());
    }

    /// Queries received so far, in call order.
    pub fn queries(&self) -> Vec<FeedQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedSource for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn mode(&self) -> FeedMode {
        self.mode
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<RawEntry>, FetchError> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(message) = &*self.failure.lock().unwrap() {
            return Err(FetchError::Network(message.clone()));
        }

        let guard = self.entries.lock().unwrap();
        let entries = guard.clone().unwrap_or_default();

        // API results are capped, the RSS snapshot never is
        Ok(match self.mode {
            FeedMode::Api => entries
                .into_iter()
                .take(query.effective_max_results())
                .collect(),
            FeedMode::Rss => entries,
        })
    }
}

/// Helper function to create an RSS entry for testing.
pub fn rss_entry(title: &str, announce_type: &str) -> RawEntry {
    let slug = title.to_lowercase().replace(' ', "-");
    RawEntry::titled(title)
        .link(format!("https://arxiv.org/abs/{}", slug))
        .announce_type(announce_type)
}
