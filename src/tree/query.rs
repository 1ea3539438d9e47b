//! Read-only questions asked of a built forest.

use serde::Serialize;

use crate::model::{Category, CategoryNode};

/// Depth-first lookup by id.
pub fn find<'a>(forest: &'a [CategoryNode], id: &str) -> Option<&'a CategoryNode> {
    for node in forest {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Ids of every descendant of `node`, pre-order.
pub fn descendant_ids(node: &CategoryNode) -> Vec<String> {
    let mut ids = Vec::new();
    let mut stack: Vec<&CategoryNode> = node.children.iter().rev().collect();
    while let Some(current) = stack.pop() {
        ids.push(current.id().to_string());
        stack.extend(current.children.iter().rev());
    }
    ids
}

/// Categories selectable as parent in the create/edit form, in display order.
///
/// When editing (`editing` is `Some`), the category itself and its whole
/// subtree are left out so the edit cannot introduce a cycle.
pub fn eligible_parents<'a>(forest: &'a [CategoryNode], editing: Option<&str>) -> Vec<&'a Category> {
    fn walk<'a>(nodes: &'a [CategoryNode], editing: Option<&str>, out: &mut Vec<&'a Category>) {
        for node in nodes {
            if Some(node.id()) == editing {
                continue;
            }
            out.push(&node.category);
            walk(&node.children, editing, out);
        }
    }

    let mut out = Vec::new();
    walk(forest, editing, &mut out);
    out
}

/// Summary figures for a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total: usize,
    pub roots: usize,
    pub active: usize,
    pub inactive: usize,
    pub products: u64,
    /// Deepest level present; a lone root is depth 0.
    pub max_depth: usize,
}

impl TreeStats {
    pub fn collect(forest: &[CategoryNode]) -> Self {
        let mut stats = Self {
            roots: forest.len(),
            ..Self::default()
        };
        let mut stack: Vec<(&CategoryNode, usize)> = forest.iter().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            stats.total += 1;
            if node.category.is_active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
            stats.products += node.category.product_count;
            stats.max_depth = stats.max_depth.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        stats
    }
}
