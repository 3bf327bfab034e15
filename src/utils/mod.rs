//! Utility modules supporting the arXiv pipeline.
//!
//! - [`HttpClient`]: reqwest wrapper performing the single GET behind each fetch
//! - [`should_keep`] / [`is_replacement`]: announcement-type filter for RSS entries
//! - [`matches_keyword`]: case-insensitive keyword matcher over title and summary
//!
//! ```rust
//! use arxiv_digest::models::{FeedMode, PaperRecord, RawEntry};
//! use arxiv_digest::utils::{matches_keyword, should_keep};
//!
//! let entry = RawEntry::titled("A Transformer Model").announce_type("new");
//! assert_eq!(should_keep(&entry), Ok(true));
//!
//! let record = PaperRecord::from_raw(entry, FeedMode::Rss).unwrap();
//! assert!(matches_keyword(&record, "transformer"));
//! ```

mod announce;
mod http;
mod keyword;

pub use announce::{is_replacement, should_keep};
pub use http::HttpClient;
pub use keyword::matches_keyword;
