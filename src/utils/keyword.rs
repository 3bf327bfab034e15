//! Keyword matching over paper text.

use crate::models::PaperRecord;

/// Case-insensitive substring test of `keyword` against title and summary
///
/// The two fields are joined with a single space, so a keyword may straddle
/// them. An empty keyword matches every record.
pub fn matches_keyword(record: &PaperRecord, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }

    let haystack = format!("{} {}", record.title(), record.summary()).to_lowercase();
    haystack.contains(&keyword.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeedMode, RawEntry};

    fn record(title: &str, summary: &str) -> PaperRecord {
        PaperRecord::from_raw(RawEntry::titled(title).summary(summary), FeedMode::Rss).unwrap()
    }

    #[test]
    fn test_empty_keyword_matches_everything() {
        assert!(matches_keyword(&record("Anything", ""), ""));
        assert!(matches_keyword(&record("Graph Networks", "No match here"), ""));
    }

    #[test]
    fn test_title_match_case_insensitive() {
        let paper = record("A Transformer Model", "");
        assert!(matches_keyword(&paper, "transformer"));
        assert!(matches_keyword(&paper, "TRANSFORMER"));
        assert!(!matches_keyword(&paper, "graph"));
    }

    #[test]
    fn test_summary_match() {
        let paper = record("Graph Networks", "We study Message Passing at scale.");
        assert!(matches_keyword(&paper, "message passing"));
    }

    #[test]
    fn test_substring_not_word_boundary() {
        let paper = record("Transformers everywhere", "");
        assert!(matches_keyword(&paper, "former"));
    }
}
