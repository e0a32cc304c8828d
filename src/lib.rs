//! ngloc - localization key maintenance for Angular-style web projects
//!
//! ngloc scans markup and script sources for translation keys, merges them
//! with per-language JSON catalogs into a key tree, and renames keys in the
//! source and in every catalog at once. It runs as a CLI and as an MCP server.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and command-line overrides
//! - `core`: Extraction, key tree, catalogs, rename engine and scan controller
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod mcp;
