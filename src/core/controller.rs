//! Drives scans, renames and translation edits against one source tree.
//!
//! A plain two-state machine (`Idle` / `Scanning`) plus a pending-rescan flag.
//! Change notifications arriving while the consumer is inactive only set the
//! flag; the scan runs on the next activation. The [`ChangeSource`] is
//! switched off around every operation that reads or writes watched files.

use tracing::{debug, warn};

use crate::core::{
    builder::TreeBuilder,
    catalog::{CatalogStore, KeyAction},
    error::{LocalizerError, LocalizerResult},
    rename::{KeyRenamer, RenameOutcome},
    sync::transfer_tree_state,
    tree::{NodeId, Tree},
};

/// Anything that can raise "something changed under the watched folders".
pub trait ChangeSource {
    /// Stop or resume delivering notifications.
    fn set_enabled(&self, enabled: bool);
}

/// Change source for one-shot runs where nothing is watched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChangeSource;

impl ChangeSource for NoChangeSource {
    fn set_enabled(&self, _enabled: bool) {}
}

/// Disables a change source until dropped.
struct Suspended<'a, S: ChangeSource>(&'a S);

impl<'a, S: ChangeSource> Suspended<'a, S> {
    fn new(source: &'a S) -> Self {
        source.set_enabled(false);
        Self(source)
    }
}

impl<S: ChangeSource> Drop for Suspended<'_, S> {
    fn drop(&mut self) {
        self.0.set_enabled(true);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

pub struct ScanController<S: ChangeSource = NoChangeSource> {
    builder: TreeBuilder,
    store: CatalogStore,
    changes: S,
    tree: Tree,
    state: ScanState,
    pending_rescan: bool,
    active: bool,
}

impl ScanController<NoChangeSource> {
    pub fn unwatched(builder: TreeBuilder, store: CatalogStore) -> Self {
        Self::new(builder, store, NoChangeSource)
    }
}

impl<S: ChangeSource> ScanController<S> {
    pub fn new(builder: TreeBuilder, store: CatalogStore, changes: S) -> Self {
        Self {
            builder,
            store,
            changes,
            tree: Tree::new(),
            state: ScanState::Idle,
            pending_rescan: false,
            active: true,
        }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn languages(&self) -> &[String] {
        self.builder.languages()
    }

    pub fn change_source(&self) -> &S {
        &self.changes
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_rescan_pending(&self) -> bool {
        self.pending_rescan
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn scan(&mut self) -> LocalizerResult<()> {
        self.scan_with_progress(&mut |_| {})
    }

    /// Rebuild the tree, carry UI state over and reveal `NEW` keys.
    ///
    /// On failure the previous tree is kept. The pending flag is cleared
    /// either way.
    pub fn scan_with_progress(&mut self, progress: &mut dyn FnMut(f32)) -> LocalizerResult<()> {
        self.state = ScanState::Scanning;
        let result = {
            let _suspended = Suspended::new(&self.changes);
            self.builder.build_with_progress(&self.store, progress)
        };
        self.pending_rescan = false;
        self.state = ScanState::Idle;

        match result {
            Ok(mut tree) => {
                transfer_tree_state(&mut tree, &self.tree);
                tree.reveal_new_keys();
                self.tree = tree;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "scan failed, keeping previous tree");
                Err(err)
            }
        }
    }

    /// React to a change notification. Returns whether a scan ran.
    pub fn on_change_detected(&mut self) -> LocalizerResult<bool> {
        if self.state == ScanState::Scanning || !self.active {
            debug!("change detected, rescan deferred");
            self.pending_rescan = true;
            return Ok(false);
        }
        self.scan()?;
        Ok(true)
    }

    /// The consumer became visible again; run a deferred scan if one is due.
    pub fn on_activated(&mut self) -> LocalizerResult<bool> {
        self.active = true;
        if !self.pending_rescan {
            return Ok(false);
        }
        self.scan()?;
        Ok(true)
    }

    pub fn on_deactivated(&mut self) {
        self.active = false;
    }

    /// Rename key node `id`, then rescan so every usage offset is fresh.
    ///
    /// A failing rescan is logged; the rename itself already succeeded.
    pub fn rename(&mut self, id: NodeId, new_key: &str) -> LocalizerResult<RenameOutcome> {
        let outcome = {
            let _suspended = Suspended::new(&self.changes);
            KeyRenamer::new(&self.store, self.builder.languages()).rename(&mut self.tree, id, new_key)?
        };
        if let Err(err) = self.scan() {
            warn!(error = %err, "rescan after rename failed");
        }
        Ok(outcome)
    }

    /// Store `text` for `language` on key node `id` and refresh aggregates.
    ///
    /// `None` leaves the catalog untouched, matching a translation that was
    /// never entered.
    pub fn set_translation(
        &mut self,
        id: NodeId,
        language: &str,
        text: Option<&str>,
    ) -> LocalizerResult<Option<KeyAction>> {
        let node = self.tree.node(id);
        if !node.is_key() {
            return Err(LocalizerError::NotAKeyNode {
                key: node.key.clone(),
            });
        }
        if !self.builder.languages().iter().any(|l| l == language) {
            return Err(LocalizerError::UnknownLanguage {
                language: language.to_string(),
            });
        }
        let key = node.key.clone();

        let action = {
            let _suspended = Suspended::new(&self.changes);
            self.store.save_translation(language, &key, text)?
        };

        // every node with this key reads the same catalog entry
        if action.is_some() {
            for shared in self.tree.find_keys(&key, None) {
                let Some(item) = self.tree.node_mut(shared).key_item_mut() else {
                    continue;
                };
                for translation in item.translations.iter_mut().filter(|t| t.language == language) {
                    translation.text = text.map(String::from);
                }
            }
        }
        self.tree.recompute_aggregates();
        Ok(action)
    }
}
