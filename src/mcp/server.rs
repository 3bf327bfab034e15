//! MCP server implementation using pmcp (Pragmatic AI's rust-mcp-sdk).
//!
//! This module provides the MCP server implementation using the pmcp crate
//! for proper JSON-RPC handling over stdio and streamable HTTP.

use crate::config::SessionConfig;
use crate::digest::DigestTools;
use crate::mcp::resources::{GreetPrompt, HistoryResources, GREET_PROMPT};
use crate::mcp::tools::ToolRegistry;
use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer, Error, RequestHandlerExtra, Server,
    ServerCapabilities, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Server name reported to MCP clients
pub const SERVER_NAME: &str = "arxiv-digest";

/// The MCP server for arXiv Digest
///
/// Exposes the digest tools, the hello-world resource and the greet prompt.
/// The built server is owned until a transport is chosen; running consumes it.
#[derive(Debug)]
pub struct McpServer {
    server: Server,
}

impl McpServer {
    /// Create a new MCP server over a digest and the session configuration passed to every tool call
    pub fn new(digest: Arc<dyn DigestTools>, session: SessionConfig) -> Result<Self, pmcp::Error> {
        let tools = ToolRegistry::from_digest(digest);
        let server = Self::build_server_impl(tools, Arc::new(session))?;
        Ok(Self { server })
    }

    /// Build the MCP server with tool handlers (internal implementation)
    fn build_server_impl(
        tools: ToolRegistry,
        session: Arc<SessionConfig>,
    ) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name(SERVER_NAME)
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let tool_handler = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
                session: session.clone(),
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder = builder
            .resources(HistoryResources)
            .prompt(GREET_PROMPT, GreetPrompt);

        builder.build()
    }

    /// Run the server in stdio mode (for Claude Desktop and other MCP clients)
    pub async fn run(self) -> Result<(), pmcp::Error> {
        tracing::info!("Starting MCP server in stdio mode");

        self.server.run_stdio().await
    }

    /// Run the server in streamable HTTP mode
    ///
    /// Returns the bound address and the handle of the serving task.
    pub async fn run_http(self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!("Starting MCP server in HTTP mode on {}", addr);

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let http_server = StreamableHttpServer::new(socket_addr, Arc::new(Mutex::new(self.server)));

        http_server.start().await
    }
}

/// Wrapper for adapting our Tool to pmcp's ToolHandler
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
    session: Arc<SessionConfig>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        tracing::debug!(tool = %self.name, "tool call");

        self.handler
            .execute(args, &self.session)
            .await
            .map_err(|e| Error::internal(&e))
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}
