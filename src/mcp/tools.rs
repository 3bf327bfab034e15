//! Tool registry for MCP tools.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::config::SessionConfig;
use crate::digest::DigestTools;

use super::handlers::{
    FetchPostingsHandler, HelloHandler, KeywordSearchHandler, SearchArxivHandler,
};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "search_arxiv")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments and the caller's session
    async fn execute(&self, args: Value, session: &SessionConfig) -> Result<Value, String>;
}

/// Routing table from tool name to handler
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry holding the four digest tools
    pub fn from_digest(digest: Arc<dyn DigestTools>) -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register(Tool {
            name: "hello".to_string(),
            description: "Say hello to someone.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Who to greet"
                    }
                },
                "required": ["name"]
            }),
            handler: Arc::new(HelloHandler {
                digest: digest.clone(),
            }),
        });

        registry.register(Tool {
            name: "search_arxiv".to_string(),
            description: "Search arXiv papers in a category, newest submissions first. The number of papers comes from the session's num_papers setting.".to_string(),
            input_schema: category_schema(),
            handler: Arc::new(SearchArxivHandler {
                digest: digest.clone(),
            }),
        });

        registry.register(Tool {
            name: "fetch_current_arxiv_postings_rss".to_string(),
            description: "Fetch today's new and cross-listed arXiv postings for a category from its RSS feed. Replacements are left out.".to_string(),
            input_schema: category_schema(),
            handler: Arc::new(FetchPostingsHandler {
                digest: digest.clone(),
            }),
        });

        registry.register(Tool {
            name: "keyword_search_arxiv_rss".to_string(),
            description: "Search today's new and cross-listed arXiv postings for a category for a keyword in the title or abstract (case-insensitive).".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "arXiv category code (e.g., 'cs.AI', 'cs.LG', 'math.CO')"
                    },
                    "keyword": {
                        "type": "string",
                        "description": "Text to look for in title and abstract"
                    }
                },
                "required": ["category", "keyword"]
            }),
            handler: Arc::new(KeywordSearchHandler { digest }),
        });

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Execute a tool by name
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        session: &SessionConfig,
    ) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tool.handler.execute(args, session).await
    }
}

fn category_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "category": {
                "type": "string",
                "description": "arXiv category code (e.g., 'cs.AI', 'cs.LG', 'math.CO')"
            }
        },
        "required": ["category"]
    })
}
