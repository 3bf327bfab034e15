//! Tool handlers translating JSON arguments into digest calls.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::config::SessionConfig;
use crate::digest::DigestTools;
use crate::models::PaperRecord;

/// Read a required string argument
fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing '{}' parameter", key))
}

fn records_to_value(records: Vec<PaperRecord>) -> Result<Value, String> {
    serde_json::to_value(records).map_err(|e| format!("Failed to serialize papers: {}", e))
}

/// Handler for `hello`
#[derive(Debug)]
pub struct HelloHandler {
    pub digest: Arc<dyn DigestTools>,
}

#[async_trait::async_trait]
impl ToolHandler for HelloHandler {
    async fn execute(&self, args: Value, session: &SessionConfig) -> Result<Value, String> {
        let name = required_str(&args, "name")?;
        Ok(Value::String(self.digest.hello(name, session)))
    }
}

/// Handler for `search_arxiv`
#[derive(Debug)]
pub struct SearchArxivHandler {
    pub digest: Arc<dyn DigestTools>,
}

#[async_trait::async_trait]
impl ToolHandler for SearchArxivHandler {
    async fn execute(&self, args: Value, session: &SessionConfig) -> Result<Value, String> {
        let category = required_str(&args, "category")?;

        let records = self
            .digest
            .search_arxiv(category, session)
            .await
            .map_err(|e| format!("arXiv search failed: {}", e))?;

        records_to_value(records)
    }
}

/// Handler for `fetch_current_arxiv_postings_rss`
#[derive(Debug)]
pub struct FetchPostingsHandler {
    pub digest: Arc<dyn DigestTools>,
}

#[async_trait::async_trait]
impl ToolHandler for FetchPostingsHandler {
    async fn execute(&self, args: Value, session: &SessionConfig) -> Result<Value, String> {
        let category = required_str(&args, "category")?;

        let records = self
            .digest
            .fetch_current_arxiv_postings_rss(category, session)
            .await
            .map_err(|e| format!("Failed to fetch arXiv RSS feed: {}", e))?;

        records_to_value(records)
    }
}

/// Handler for `keyword_search_arxiv_rss`
#[derive(Debug)]
pub struct KeywordSearchHandler {
    pub digest: Arc<dyn DigestTools>,
}

#[async_trait::async_trait]
impl ToolHandler for KeywordSearchHandler {
    async fn execute(&self, args: Value, session: &SessionConfig) -> Result<Value, String> {
        let category = required_str(&args, "category")?;
        let keyword = required_str(&args, "keyword")?;

        let records = self
            .digest
            .keyword_search_arxiv_rss(category, keyword, session)
            .await
            .map_err(|e| format!("Failed to search arXiv RSS feed: {}", e))?;

        records_to_value(records)
    }
}
