//! MCP (Model Context Protocol) host adapter.

mod handlers;
pub mod resources;
pub mod server;
mod tools;

pub use server::McpServer;
pub use tools::{Tool, ToolHandler, ToolRegistry};
