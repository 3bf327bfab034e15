//! Core data models for arXiv entries and queries.

mod paper;
mod search;

pub use paper::{FeedMode, MalformedEntryError, PaperRecord, Published, RawEntry};
pub use search::{FeedQuery, DEFAULT_MAX_RESULTS};
