//! Paper models: the raw entry a fetcher yields and the canonical record a tool returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which arXiv transport produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedMode {
    /// The export.arxiv.org search API (Atom)
    Api,
    /// The per-category daily RSS feed
    Rss,
}

/// A publication timestamp as the source supplied it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Published {
    /// Parsed by the feed parser (API path)
    Instant(DateTime<Utc>),
    /// Raw element text, kept exactly as the feed wrote it (RSS path)
    Verbatim(String),
}

impl Published {
    /// Render the timestamp as text without reinterpreting it
    pub fn render(&self) -> String {
        match self {
            Published::Instant(at) => at.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
            Published::Verbatim(text) => text.clone(),
        }
    }
}

/// One entry as produced by a fetcher, before filtering and normalization
///
/// Every field is optional here; deciding which absences are defects is the
/// job of the announcement filter and the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,

    /// Summary (API) or description (RSS)
    pub summary: Option<String>,

    /// Author names (API) or the feed's creator strings as written (RSS)
    pub authors: Vec<String>,

    /// Link or entry identifier
    pub link: Option<String>,

    /// Announcement type tag such as "new", "cross", "replace" (RSS only)
    pub announce_type: Option<String>,

    pub published: Option<Published>,
}

impl RawEntry {
    /// Create an entry with just a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Add an author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.authors.push(author.into());
        self
    }

    /// Set link
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set announcement type
    pub fn announce_type(mut self, announce_type: impl Into<String>) -> Self {
        self.announce_type = Some(announce_type.into());
        self
    }

    /// Set publication timestamp
    pub fn published(mut self, published: Published) -> Self {
        self.published = Some(published);
        self
    }

    /// Link used to identify the entry in diagnostics
    pub fn display_link(&self) -> &str {
        self.link.as_deref().unwrap_or("<no link>")
    }
}

/// An entry that cannot be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedEntryError {
    #[error("entry {link} has no title")]
    MissingTitle { link: String },

    #[error("entry {link} has no announcement type")]
    MissingAnnounceType { link: String },
}

/// A paper as returned to the caller
///
/// Records are immutable once built: fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    title: String,
    authors: Vec<String>,
    summary: String,
    url: String,
    published: Option<String>,
}

impl PaperRecord {
    /// Normalize a raw entry produced in the given mode
    ///
    /// Only the title is mandatory. API authors are display names and are
    /// trimmed; RSS creator strings pass through as the feed wrote them.
    pub fn from_raw(entry: RawEntry, mode: FeedMode) -> Result<Self, MalformedEntryError> {
        let title = match entry.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                return Err(MalformedEntryError::MissingTitle {
                    link: entry.link.unwrap_or_else(|| "<no link>".to_string()),
                })
            }
        };

        let authors = match mode {
            FeedMode::Api => entry
                .authors
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            FeedMode::Rss => entry.authors,
        };

        Ok(Self {
            title,
            authors,
            summary: entry.summary.unwrap_or_default(),
            url: entry.link.unwrap_or_default(),
            published: entry.published.as_ref().map(Published::render),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn published(&self) -> Option<&str> {
        self.published.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_api_entry_normalization() {
        let published = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let entry = RawEntry::titled("Attention Is All You Need")
            .summary("We propose the Transformer.")
            .author(" Ashish Vaswani ")
            .author("")
            .author("Noam Shazeer")
            .link("http://arxiv.org/abs/1706.03762v7")
            .published(Published::Instant(published));

        let record = PaperRecord::from_raw(entry, FeedMode::Api).unwrap();

        assert_eq!(record.title(), "Attention Is All You Need");
        assert_eq!(record.authors(), ["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(record.summary(), "We propose the Transformer.");
        assert_eq!(record.url(), "http://arxiv.org/abs/1706.03762v7");
        assert_eq!(record.published(), Some("2024-01-15 10:00:00+00:00"));
    }

    #[test]
    fn test_rss_authors_pass_through() {
        let entry = RawEntry::titled("Graph Networks")
            .author("Alice Smith, Bob Jones")
            .link("https://arxiv.org/abs/2401.00001")
            .published(Published::Verbatim("Mon, 15 Jan 2024 00:00:00 -0500".to_string()));

        let record = PaperRecord::from_raw(entry, FeedMode::Rss).unwrap();

        assert_eq!(record.authors(), ["Alice Smith, Bob Jones"]);
        assert_eq!(record.published(), Some("Mon, 15 Jan 2024 00:00:00 -0500"));
        assert_eq!(record.summary(), "");
    }

    #[test]
    fn test_missing_optional_fields() {
        let record = PaperRecord::from_raw(RawEntry::titled("Bare"), FeedMode::Rss).unwrap();

        assert!(record.authors().is_empty());
        assert_eq!(record.url(), "");
        assert_eq!(record.published(), None);
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let entry = RawEntry::default().link("https://arxiv.org/abs/2401.00002");
        assert_eq!(
            PaperRecord::from_raw(entry, FeedMode::Api),
            Err(MalformedEntryError::MissingTitle {
                link: "https://arxiv.org/abs/2401.00002".to_string()
            })
        );

        let blank = RawEntry::titled("   ");
        assert!(PaperRecord::from_raw(blank, FeedMode::Rss).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let record = PaperRecord::from_raw(
            RawEntry::titled("T").summary("S").author("A").link("U"),
            FeedMode::Api,
        )
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "T",
                "authors": ["A"],
                "summary": "S",
                "url": "U",
                "published": null
            })
        );
    }
}
