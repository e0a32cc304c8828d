//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes scanning, renaming and translation editing to AI assistants over
//! stdio.
//!
//! ## Module Structure
//!
//! - `helpers`: Settings loading, error mapping and key lookup
//! - `server`: Main MCP server implementation
//! - `types`: Tool parameter and result types

mod helpers;
mod server;
pub mod types;

pub use server::{NglocMcpServer, run_server};
