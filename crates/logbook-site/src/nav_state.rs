//! Navigation widget view state.
//!
//! The set of expanded folders is owned by the caller and passed into
//! [`visible_rows`], which flattens the tree into the rows a side panel
//! would draw. Nodes are identified by their raw path key.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::slug::same_slug;
use crate::tree::{TreeNode, ancestor_keys, find_node};

/// Expand/collapse state of the navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavState {
    expanded: BTreeSet<String>,
}

impl NavState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the expanded flag of the node at `path`.
    pub fn toggle(&mut self, path: &str) {
        if !self.expanded.remove(path) {
            self.expanded.insert(path.to_owned());
        }
    }

    #[must_use]
    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Expand everything needed to show the node with `current_slug`.
    ///
    /// Ancestors are expanded, and the node itself when it has children.
    /// Previously expanded nodes stay expanded. Unknown slugs change nothing.
    pub fn reveal(&mut self, tree: &[TreeNode], current_slug: &str) {
        let Some(keys) = ancestor_keys(tree, current_slug) else {
            return;
        };
        self.expanded.extend(keys);

        if let Some(node) = find_node(tree, current_slug)
            && node.has_children()
        {
            self.expanded.insert(node.path.clone());
        }
    }
}

/// One visible row of the navigation panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavRow {
    pub depth: usize,
    pub title: String,
    pub slug: String,
    pub path: String,
    pub has_children: bool,
    pub expanded: bool,
    /// Row for the page being viewed.
    pub current: bool,
}

/// Rows visible under `state`, pre-order.
///
/// Children of collapsed nodes are hidden.
#[must_use]
pub fn visible_rows(tree: &[TreeNode], state: &NavState, current_slug: Option<&str>) -> Vec<NavRow> {
    let mut rows = Vec::new();
    push_rows(tree, state, current_slug, 0, &mut rows);
    rows
}

fn push_rows(
    nodes: &[TreeNode],
    state: &NavState,
    current_slug: Option<&str>,
    depth: usize,
    rows: &mut Vec<NavRow>,
) {
    for node in nodes {
        let expanded = state.is_expanded(&node.path);
        rows.push(NavRow {
            depth,
            title: node.title.clone(),
            slug: node.slug.clone(),
            path: node.path.clone(),
            has_children: node.has_children(),
            expanded,
            current: current_slug.is_some_and(|s| same_slug(&node.slug, s)),
        });
        if expanded {
            push_rows(&node.children, state, current_slug, depth + 1, rows);
        }
    }
}
