//! Tree View Helpers
//!
//! Turns a forest into the indented rows a list view draws, honoring
//! which categories are expanded.

use std::collections::HashSet;

use crate::model::{Category, CategoryNode};

/// Ids of the categories whose children are shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    /// Everything collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    /// Flips `id` and returns whether it is now expanded.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Expands every node in `forest` that has children.
    pub fn expand_all(&mut self, forest: &[CategoryNode]) {
        let mut stack: Vec<&CategoryNode> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            if node.has_children() {
                self.expanded.insert(node.id().to_string());
                stack.extend(node.children.iter());
            }
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// Which descendants [`flatten`] walks into.
#[derive(Debug, Clone, Copy)]
pub enum Visibility<'a> {
    /// Every node, as for search results.
    All,
    /// Only children of expanded nodes.
    Expanded(&'a ExpansionState),
}

impl Visibility<'_> {
    fn shows_children_of(&self, node: &CategoryNode) -> bool {
        match self {
            Visibility::All => true,
            Visibility::Expanded(state) => state.is_expanded(node.id()),
        }
    }
}

/// One drawn line of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub category: &'a Category,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Depth-first, pre-order rows of the visible part of `forest`.
pub fn flatten<'a>(forest: &'a [CategoryNode], visibility: Visibility<'_>) -> Vec<TreeRow<'a>> {
    fn collect<'a>(
        nodes: &'a [CategoryNode],
        depth: usize,
        visibility: Visibility<'_>,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        for node in nodes {
            let expanded = node.has_children() && visibility.shows_children_of(node);
            rows.push(TreeRow {
                category: &node.category,
                depth,
                has_children: node.has_children(),
                expanded,
            });
            if expanded {
                collect(&node.children, depth + 1, visibility, rows);
            }
        }
    }

    let mut rows = Vec::new();
    collect(forest, 0, visibility, &mut rows);
    rows
}
