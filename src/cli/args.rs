//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Show the key tree with translation counts
//! - `extract`: List every distinct key used in the sources
//! - `rename`: Rename a key in its source file and in every catalog
//! - `translate`: Write one translation text into a catalog
//! - `search`: Find keys or translations containing a text
//! - `watch`: Rescan whenever sources or catalogs change
//! - `init`: Initialize ngloc configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|c| c.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Scan(cmd)) => Some(&cmd.common),
            Some(Command::Extract(cmd)) => Some(&cmd.common),
            Some(Command::Rename(cmd)) => Some(&cmd.common),
            Some(Command::Translate(cmd)) => Some(&cmd.common),
            Some(Command::Search(cmd)) => Some(&cmd.common),
            Some(Command::Watch(cmd)) => Some(&cmd.common),
            Some(Command::Init) | Some(Command::Serve) | None => None,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Translation files directory (overrides config file)
    #[arg(long)]
    pub i18n_root: Option<PathBuf>,

    /// Comma-separated languages, e.g. "en,nl" (overrides config file)
    #[arg(long)]
    pub languages: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source_root: self.source_root.clone(),
            i18n_root: self.i18n_root.clone(),
            languages: self.languages.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only show keys with missing translations; exit with 1 if there are any
    #[arg(long)]
    pub missing: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the key list to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenameCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Current key
    pub key: String,

    /// New key (default: the conventional key derived from the file's folder)
    pub new_key: Option<String>,

    /// Source file holding the key, when the key appears in several files
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Key to translate
    pub key: String,

    /// Translation text
    pub text: String,

    /// Language of the text
    #[arg(short = 'l', long = "language")]
    pub language: String,

    /// Source file holding the key, when the key appears in several files
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SearchCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Text to look for in keys and translations (case-insensitive)
    pub text: String,
}

#[derive(Debug, Args)]
pub struct WatchCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only show keys with missing translations
    #[arg(long)]
    pub missing: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan sources and show the key tree with missing translations
    Scan(ScanCommand),
    /// List all distinct keys used in the sources
    Extract(ExtractCommand),
    /// Rename a key in its source file and in every translation file
    Rename(RenameCommand),
    /// Set the translation of a key for one language
    Translate(TranslateCommand),
    /// Search keys and translation texts
    Search(SearchCommand),
    /// Rescan whenever sources or translation files change
    Watch(WatchCommand),
    /// Initialize a new .nglocrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
