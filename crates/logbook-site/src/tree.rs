//! Navigation tree.
//!
//! Documents are folded into a [`TreeArena`] one at a time. Nodes live in a
//! flat list and are addressed by their raw path key (raw segments joined by
//! `/`), so repeated visits to the same folder from different documents
//! always land on the same node regardless of discovery order. The arena is
//! materialized into owned [`TreeNode`] values once all documents are in.
//!
//! Raw segment names are the only dedup key: `Notes/` and `notes/` become
//! separate sibling nodes even though their slugs compare equal.

use std::collections::HashMap;

use serde::Serialize;

use crate::document::Document;
use crate::slug::{derive_slug, same_slug};

/// Node variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A node in the navigation hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Raw path segment this node represents.
    pub name: String,
    /// Raw path key from the root (e.g. `systems/deep dives`).
    pub path: String,
    /// Document title for files, segment name for folders.
    pub title: String,
    /// Navigable slug; folders resolve to virtual nodes.
    pub slug: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Children in first-discovery order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Whether this node has any children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug)]
struct ArenaNode {
    name: String,
    title: String,
    slug: String,
    kind: NodeKind,
    children: Vec<usize>,
}

/// Flat node storage keyed by raw path.
#[derive(Debug, Default)]
pub struct TreeArena {
    nodes: Vec<ArenaNode>,
    keys: Vec<String>,
    roots: Vec<usize>,
    index: HashMap<String, usize>,
}

impl TreeArena {
    /// Fold one document into the arena.
    ///
    /// Intermediate segments get a folder node unless one exists already.
    /// The final segment becomes a file node carrying the document's title
    /// and slug; an existing folder at that position is converted in place
    /// and keeps its children.
    #[must_use]
    pub fn insert(mut self, document: &Document) -> Self {
        let mut parent: Option<usize> = None;
        let mut key = String::new();

        for (depth, segment) in document.path.iter().enumerate() {
            if depth > 0 {
                key.push('/');
            }
            key.push_str(segment);

            let idx = match self.index.get(&key).copied() {
                Some(idx) => idx,
                None => self.push_folder(parent, &key, segment, &document.path[..=depth]),
            };

            if depth + 1 == document.path.len() {
                let node = &mut self.nodes[idx];
                node.kind = NodeKind::File;
                node.title.clone_from(&document.metadata.title);
                node.slug.clone_from(&document.slug);
            }

            parent = Some(idx);
        }

        self
    }

    fn push_folder(
        &mut self,
        parent: Option<usize>,
        key: &str,
        segment: &str,
        segments: &[String],
    ) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(ArenaNode {
            name: segment.to_owned(),
            title: segment.to_owned(),
            slug: derive_slug(segments),
            kind: NodeKind::Folder,
            children: Vec::new(),
        });
        self.keys.push(key.to_owned());
        self.index.insert(key.to_owned(), idx);

        match parent {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    /// Materialize the arena into an owned tree.
    #[must_use]
    pub fn into_tree(self) -> Vec<TreeNode> {
        self.roots.iter().map(|&idx| self.materialize(idx)).collect()
    }

    fn materialize(&self, idx: usize) -> TreeNode {
        let node = &self.nodes[idx];
        TreeNode {
            name: node.name.clone(),
            path: self.keys[idx].clone(),
            title: node.title.clone(),
            slug: node.slug.clone(),
            kind: node.kind,
            children: node
                .children
                .iter()
                .map(|&child| self.materialize(child))
                .collect(),
        }
    }
}

/// Build the navigation tree for a set of documents.
#[must_use]
pub fn build_tree(documents: &[Document]) -> Vec<TreeNode> {
    documents
        .iter()
        .fold(TreeArena::default(), TreeArena::insert)
        .into_tree()
}

/// Slugs of every file node, pre-order.
#[must_use]
pub fn flatten_file_slugs(tree: &[TreeNode]) -> Vec<String> {
    let mut slugs = Vec::new();
    collect_file_slugs(tree, &mut slugs);
    slugs
}

fn collect_file_slugs(nodes: &[TreeNode], out: &mut Vec<String>) {
    for node in nodes {
        if node.kind == NodeKind::File {
            out.push(node.slug.clone());
        }
        collect_file_slugs(&node.children, out);
    }
}

/// First node (pre-order) whose slug matches, ignoring case.
#[must_use]
pub fn find_node<'a>(tree: &'a [TreeNode], slug: &str) -> Option<&'a TreeNode> {
    tree.iter().find_map(|node| {
        if same_slug(&node.slug, slug) {
            Some(node)
        } else {
            find_node(&node.children, slug)
        }
    })
}

/// Raw path keys of the nodes above the node with `slug`, root first.
///
/// Returns `None` if no node has that slug.
#[must_use]
pub fn ancestor_keys(tree: &[TreeNode], slug: &str) -> Option<Vec<String>> {
    for node in tree {
        if same_slug(&node.slug, slug) {
            return Some(Vec::new());
        }
        if let Some(mut keys) = ancestor_keys(&node.children, slug) {
            keys.insert(0, node.path.clone());
            return Some(keys);
        }
    }
    None
}
