//! Feed query model.

/// Result count used when a query does not specify one
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// What to fetch: a category, an optional result cap and an optional keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// Taxonomy code such as "cs.AI"
    pub category: String,

    /// Maximum number of results (API path only; the RSS feed is a full daily snapshot)
    pub max_results: Option<usize>,

    /// Case-insensitive substring to look for in title and summary
    pub keyword: Option<String>,
}

impl FeedQuery {
    /// Create a new query for a category
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            max_results: None,
            keyword: None,
        }
    }

    /// Set maximum results
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Set keyword filter
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// The result cap to apply, falling back to the default
    pub fn effective_max_results(&self) -> usize {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }
}
