//! Search over a built forest.

use crate::model::CategoryNode;

/// Prunes `forest` to the nodes matching `query` plus their ancestors.
///
/// A node survives if its name, description or path contains `query`
/// (ignoring case) or if any descendant survives. Surviving nodes keep
/// only their surviving children, in their original order. An empty query
/// returns the forest unchanged.
pub fn filter_tree(forest: &[CategoryNode], query: &str) -> Vec<CategoryNode> {
    if query.is_empty() {
        return forest.to_vec();
    }
    let needle = query.to_lowercase();
    let filtered: Vec<CategoryNode> = forest.iter().filter_map(|node| prune(node, &needle)).collect();
    tracing::debug!(query, roots = filtered.len(), "filtered category tree");
    filtered
}

fn prune(node: &CategoryNode, needle: &str) -> Option<CategoryNode> {
    let children: Vec<CategoryNode> = node
        .children
        .iter()
        .filter_map(|child| prune(child, needle))
        .collect();

    if node.category.matches_lowercase(needle) || !children.is_empty() {
        Some(CategoryNode {
            category: node.category.clone(),
            children,
        })
    } else {
        None
    }
}

/// Drops inactive categories together with everything below them.
pub fn retain_active(forest: &[CategoryNode]) -> Vec<CategoryNode> {
    forest
        .iter()
        .filter(|node| node.category.is_active)
        .map(|node| CategoryNode {
            category: node.category.clone(),
            children: retain_active(&node.children),
        })
        .collect()
}
