//! Announcement-type filtering for the daily RSS feed.
//!
//! arXiv's feed mixes brand-new submissions, cross-listings and replacements of
//! earlier submissions. Only the first two are kept.

use crate::models::{MalformedEntryError, RawEntry};

/// Token marking a replacement announcement ("replace", "replace-cross", ...)
const REPLACEMENT_TOKEN: &str = "replace";

/// Whether an announcement tag denotes a replacement (case-insensitive)
pub fn is_replacement(announce_type: &str) -> bool {
    announce_type.to_lowercase().contains(REPLACEMENT_TOKEN)
}

/// Decide whether an RSS entry should be kept
///
/// A missing or blank tag is a defect, never an implicit keep.
pub fn should_keep(entry: &RawEntry) -> Result<bool, MalformedEntryError> {
    match entry.announce_type.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => Ok(!is_replacement(tag)),
        _ => Err(MalformedEntryError::MissingAnnounceType {
            link: entry.display_link().to_string(),
        }),
    }
}
