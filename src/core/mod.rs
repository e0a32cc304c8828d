//! Core engine: extraction, tree building, synchronization and renaming.
//!
//! ## Module Structure
//!
//! - `extract`: pattern-based token scanners (`*.html`, `*.ts`)
//! - `catalog`: per-language JSON catalogs with sorted, path-based edits
//! - `tree`: arena tree of folders, files and key nodes
//! - `builder`: walks the source root and assembles the tree
//! - `sync`: carries expanded/selected state into a rebuilt tree
//! - `rename`: validated, all-or-nothing key rename
//! - `search`, `preview`: find-next and source context for a usage
//! - `controller`, `watcher`: scan state machine and filesystem change source

pub mod builder;
pub mod catalog;
pub mod controller;
pub mod error;
pub mod extract;
pub mod preview;
pub mod rename;
pub mod search;
pub mod sync;
pub mod tree;
pub mod watcher;

pub use builder::TreeBuilder;
pub use catalog::{Catalog, CatalogStore, KeyAction};
pub use controller::{ChangeSource, NoChangeSource, ScanController, ScanState};
pub use error::{LocalizerError, LocalizerResult};
pub use extract::{TokenExtractor, TokenUsage};
pub use rename::{KeyRenamer, RenameOutcome};
pub use tree::{KeyItem, Node, NodeId, NodeKind, Translation, Tree};
pub use watcher::FsChangeSource;
