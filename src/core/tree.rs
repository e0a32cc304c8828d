//! The extraction tree: folders, files and key nodes in one arena.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Children are
//! owned by their parent's `children` list; the `parent` link is only used for
//! walking upwards (namespaces, revealing nodes).
//!
//! Aggregates (key counts, missing translations) are plain fields refreshed by
//! [`Tree::recompute_aggregates`] after every mutation.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::LazyLock,
    time::SystemTime,
};

use regex::Regex;

use crate::core::{
    error::{LocalizerError, LocalizerResult},
    extract::TokenUsage,
};

/// Key text used as a placeholder for translations that still need a name.
pub const NEW_KEY: &str = "NEW";

/// Key of the synthetic root node.
pub const ROOT_KEY: &str = "root";

static KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*$").unwrap());

/// Whether `key` is a well-formed dot-separated translation key.
pub fn is_valid_key(key: &str) -> bool {
    KEY_REGEX.is_match(key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Translation of one key into one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub language: String,
    /// `None` when the catalog has no value at the key path.
    pub text: Option<String>,
}

impl Translation {
    pub fn is_missing(&self) -> bool {
        self.text.as_deref().is_none_or(|t| t.trim().is_empty())
    }
}

/// Payload of a key node: one distinct key found in one file.
#[derive(Debug, Clone)]
pub struct KeyItem {
    pub full_filename: PathBuf,
    /// Every occurrence of the key in `full_filename`.
    pub usages: Vec<TokenUsage>,
    /// One entry per configured language, in configuration order.
    pub translations: Vec<Translation>,
}

impl KeyItem {
    pub fn translation(&self, language: &str) -> Option<&Translation> {
        self.translations.iter().find(|t| t.language == language)
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Root,
    Folder,
    File {
        full_filename: PathBuf,
        /// Modification time seen during the scan.
        last_source_write: Option<SystemTime>,
    },
    Key(KeyItem),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub key: String,
    pub kind: NodeKind,
    pub is_expanded: bool,
    pub is_selected: bool,
    /// Key already starts with the namespace of its folder chain.
    /// Always true for non-key nodes.
    pub is_default_key: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text_count: usize,
    missing_count: usize,
    missing_per_language: BTreeMap<String, usize>,
}

impl Node {
    fn new(key: String, kind: NodeKind) -> Self {
        Self {
            key,
            kind,
            is_expanded: false,
            is_selected: false,
            is_default_key: false,
            parent: None,
            children: Vec::new(),
            text_count: 0,
            missing_count: 0,
            missing_per_language: BTreeMap::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File { .. })
    }

    /// A leaf carrying usages and translations.
    pub fn is_key(&self) -> bool {
        matches!(self.kind, NodeKind::Key(_))
    }

    pub fn is_new(&self) -> bool {
        self.is_key() && self.key == NEW_KEY
    }

    /// Non-key nodes are always valid.
    pub fn is_valid(&self) -> bool {
        !self.is_key() || is_valid_key(&self.key)
    }

    pub fn key_item(&self) -> Option<&KeyItem> {
        match &self.kind {
            NodeKind::Key(item) => Some(item),
            _ => None,
        }
    }

    pub fn key_item_mut(&mut self) -> Option<&mut KeyItem> {
        match &mut self.kind {
            NodeKind::Key(item) => Some(item),
            _ => None,
        }
    }

    /// Source file for file and key nodes.
    pub fn full_filename(&self) -> Option<&Path> {
        match &self.kind {
            NodeKind::File { full_filename, .. } => Some(full_filename),
            NodeKind::Key(item) => Some(&item.full_filename),
            NodeKind::Root | NodeKind::Folder => None,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Key nodes at or below this node.
    pub fn text_count(&self) -> usize {
        self.text_count
    }

    /// Missing translations at or below this node, over all languages.
    pub fn missing_count(&self) -> usize {
        self.missing_count
    }

    pub fn has_missing_translations(&self) -> bool {
        self.missing_count > 0
    }

    pub fn missing_per_language(&self) -> &BTreeMap<String, usize> {
        &self.missing_per_language
    }

    /// `"de:2 nl:1"`, languages with nothing missing are left out.
    pub fn missing_label(&self) -> String {
        self.missing_per_language
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(language, count)| format!("{}:{}", language, count))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lower-cased `search` is found in the key or in any translation text.
    pub fn matches_filter(&self, search: &str) -> bool {
        let search = search.to_lowercase();
        if self.key.to_lowercase().contains(&search) {
            return true;
        }
        self.key_item().is_some_and(|item| {
            item.translations.iter().any(|t| {
                t.text
                    .as_deref()
                    .is_some_and(|text| text.to_lowercase().contains(&search))
            })
        })
    }
}

/// Owned node description produced by the builder before it enters an arena.
#[derive(Debug, Clone)]
pub(crate) struct NodeDraft {
    pub key: String,
    pub kind: NodeKind,
    pub children: Vec<NodeDraft>,
}

impl NodeDraft {
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// A tree holding only the root node.
    pub fn new() -> Self {
        let mut root = Node::new(ROOT_KEY.to_string(), NodeKind::Root);
        root.is_default_key = true;
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub(crate) fn from_drafts(drafts: Vec<NodeDraft>) -> Self {
        let mut tree = Self::new();
        let root = tree.root;
        for draft in drafts {
            tree.attach(root, draft);
        }
        tree
    }

    fn attach(&mut self, parent: NodeId, draft: NodeDraft) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(draft.key, draft.kind);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        for child in draft.children {
            self.attach(id, child);
        }
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Top-level folders and files.
    pub fn root_items(&self) -> &[NodeId] {
        self.nodes[self.root.0].children()
    }

    pub fn is_empty(&self) -> bool {
        self.root_items().is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.0].children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Ancestors of `id`, nearest first, including the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// All nodes below `id` in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// Every key node in pre-order.
    pub fn key_nodes(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|id| self.node(*id).is_key())
            .collect()
    }

    /// Key nodes whose key equals `key`, optionally restricted to one file.
    pub fn find_keys(&self, key: &str, file: Option<&Path>) -> Vec<NodeId> {
        self.key_nodes()
            .into_iter()
            .filter(|id| {
                let node = self.node(*id);
                node.key == key && file.is_none_or(|f| node.full_filename() == Some(f))
            })
            .collect()
    }

    /// Number of key nodes using `key`, not counting `exclude`.
    pub fn count_keys(&self, key: &str, exclude: Option<NodeId>) -> usize {
        self.key_nodes()
            .into_iter()
            .filter(|id| Some(*id) != exclude && self.node(*id).key == key)
            .count()
    }

    /// Upper-cased folder chain joined by `.`, with a trailing dot.
    ///
    /// A key in `src/app/home/home.component.html` under source root `src`
    /// gets the namespace `APP.HOME.`.
    pub fn namespace(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .map(|a| self.node(a))
            .filter(|n| n.is_folder())
            .map(|n| n.key.as_str())
            .collect();
        parts.reverse();
        format!("{}.", parts.join(".")).to_uppercase()
    }

    /// Display text: the key without its namespace for conventional keys.
    pub fn label(&self, id: NodeId) -> String {
        let node = self.node(id);
        if node.is_key() && node.is_valid() && node.is_default_key {
            let namespace = self.namespace(id);
            if let Some(rest) = node.key.strip_prefix(&namespace) {
                return rest.to_string();
            }
        }
        node.key.clone()
    }

    /// Suggested key following the namespace convention.
    pub fn default_key_name(&self, id: NodeId) -> LocalizerResult<String> {
        let node = self.node(id);
        let namespace = self.namespace(id);
        if node.key.starts_with(&namespace) {
            return Ok(node.key.clone());
        }
        let last = node.key.rsplit('.').next().unwrap_or_default();
        if last.trim().is_empty() {
            return Err(LocalizerError::InvalidKey {
                key: node.key.clone(),
            });
        }
        Ok(format!("{}{}", namespace, last.to_uppercase()))
    }

    /// Slash-joined keys from the top level down to `id`.
    pub fn display_path(&self, id: NodeId) -> String {
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .filter(|a| *a != self.root)
            .map(|a| self.node(a).key.as_str())
            .collect();
        parts.reverse();
        parts.push(&self.node(id).key);
        parts.join("/")
    }

    /// Set `is_default_key` for every node below the root.
    pub fn mark_default_keys(&mut self) {
        for id in self.descendants(self.root) {
            let node = self.node(id);
            let is_default = if node.is_key() && node.is_valid() {
                node.key.starts_with(&self.namespace(id))
            } else {
                true
            };
            self.node_mut(id).is_default_key = is_default;
        }
    }

    /// Refresh key counts and missing-translation counts bottom-up.
    pub fn recompute_aggregates(&mut self) {
        let mut order = self.descendants(self.root);
        order.insert(0, self.root);
        for id in order.into_iter().rev() {
            let (mut text_count, mut missing_count, mut per_language) = match &self.node(id).kind {
                NodeKind::Key(item) => {
                    let mut per_language = BTreeMap::new();
                    for t in &item.translations {
                        *per_language.entry(t.language.clone()).or_insert(0) +=
                            usize::from(t.is_missing());
                    }
                    let missing = item.translations.iter().filter(|t| t.is_missing()).count();
                    (1, missing, per_language)
                }
                _ => (0, 0, BTreeMap::new()),
            };
            for child in self.children(id) {
                let child = self.node(*child);
                text_count += child.text_count;
                missing_count += child.missing_count;
                for (language, count) in &child.missing_per_language {
                    *per_language.entry(language.clone()).or_insert(0) += count;
                }
            }
            let node = self.node_mut(id);
            node.text_count = text_count;
            node.missing_count = missing_count;
            node.missing_per_language = per_language;
        }
    }

    /// Expand every ancestor of `id` so it becomes visible.
    pub fn expand_parents(&mut self, id: NodeId) {
        let ancestors: Vec<NodeId> = self.ancestors(id).collect();
        for ancestor in ancestors {
            self.node_mut(ancestor).is_expanded = true;
        }
    }

    /// Expand the path to every `NEW` key.
    pub fn reveal_new_keys(&mut self) {
        for id in self.key_nodes() {
            if self.node(id).is_new() {
                self.expand_parents(id);
            }
        }
    }

    pub fn selected(&self) -> Option<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .find(|id| self.node(*id).is_selected)
    }

    /// Make `id` the only selected node.
    pub fn select(&mut self, id: NodeId) {
        for node in &mut self.nodes {
            node.is_selected = false;
        }
        self.node_mut(id).is_selected = true;
    }

    /// Next node in depth-first order, or `None` past the last node.
    pub fn walk_next(&self, id: NodeId, step_into_children: bool) -> Option<NodeId> {
        if step_into_children && let Some(first) = self.children(id).first() {
            return Some(*first);
        }
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|s| *s == id)?;
        match siblings.get(index + 1) {
            Some(next) => Some(*next),
            None => self.walk_next(parent, false),
        }
    }
}
