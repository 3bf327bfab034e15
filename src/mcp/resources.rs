//! Static resource and prompt served next to the tools.

use std::collections::HashMap;

use async_trait::async_trait;
use pmcp::types::{
    Content, GetPromptResult, ListResourcesResult, PromptMessage, ReadResourceResult,
    ResourceInfo, Role,
};
use pmcp::{Error, PromptHandler, RequestHandlerExtra, ResourceHandler};

/// URI of the hello-world history resource
pub const HELLO_WORLD_URI: &str = "history://hello-world";

/// Name of the greeting prompt
pub const GREET_PROMPT: &str = "greet";

/// Text of the hello-world history resource
pub fn hello_world_history() -> &'static str {
    "\"Hello, World\" first appeared in a 1972 Bell Labs memo by \
     Brian Kernighan and later became the iconic first program \
     for beginners in countless languages."
}

/// User message produced by the greeting prompt
pub fn greet_message(name: &str) -> String {
    format!("Say hello to {}", name)
}

/// Serves [`HELLO_WORLD_URI`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryResources;

#[async_trait]
impl ResourceHandler for HistoryResources {
    async fn read(
        &self,
        uri: &str,
        _extra: RequestHandlerExtra,
    ) -> Result<ReadResourceResult, Error> {
        if uri != HELLO_WORLD_URI {
            return Err(Error::invalid_params(format!("Unknown resource: {}", uri)));
        }

        Ok(ReadResourceResult {
            contents: vec![Content::Text {
                text: hello_world_history().to_string(),
            }],
        })
    }

    async fn list(
        &self,
        _cursor: Option<String>,
        _extra: RequestHandlerExtra,
    ) -> Result<ListResourcesResult, Error> {
        Ok(ListResourcesResult {
            resources: vec![ResourceInfo {
                uri: HELLO_WORLD_URI.to_string(),
                name: "hello_world".to_string(),
                description: Some(
                    "The origin story of the famous 'Hello, World' program.".to_string(),
                ),
                mime_type: Some("text/plain".to_string()),
            }],
            next_cursor: None,
        })
    }
}

/// The `greet` prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetPrompt;

#[async_trait]
impl PromptHandler for GreetPrompt {
    async fn handle(
        &self,
        args: HashMap<String, String>,
        _extra: RequestHandlerExtra,
    ) -> Result<GetPromptResult, Error> {
        let name = args
            .get("name")
            .ok_or_else(|| Error::invalid_params("Missing 'name' argument"))?;

        Ok(GetPromptResult {
            description: Some("Generate a greeting prompt.".to_string()),
            messages: vec![PromptMessage {
                role: Role::User,
                content: Content::Text {
                    text: greet_message(name),
                },
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greet_message() {
        assert_eq!(greet_message("Alice"), "Say hello to Alice");
    }

    #[test]
    fn test_history_text() {
        assert!(hello_world_history().starts_with("\"Hello, World\" first appeared in a 1972"));
        assert!(hello_world_history().contains("Brian Kernighan"));
    }
}
