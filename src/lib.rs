//! # arXiv Digest
//!
//! A Model Context Protocol (MCP) server that greets users and browses arXiv
//! by category: the newest submissions via the search API, and today's
//! announcements via the daily RSS feed (replacements left out, optionally
//! narrowed by keyword).
//!
//! ## Architecture
//!
//! - [`models`]: paper records, raw feed entries and queries
//! - [`sources`]: the API and RSS fetchers behind the [`sources::FeedSource`] trait
//! - [`utils`]: HTTP client, announcement-type filter and keyword matcher
//! - [`digest`]: the four tool operations as a plain Rust interface
//! - [`mcp`]: tool registry and pmcp server
//! - [`config`]: configuration management

pub mod config;
pub mod digest;
pub mod mcp;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use digest::{ArxivDigest, DigestTools};
pub use models::PaperRecord;
