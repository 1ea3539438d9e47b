//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use category_tree::{Category, CategoryNode};

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn category(id: &str, parent: Option<&str>, name: &str, sort_order: i64) -> Category {
    let category = Category::new(id, name).with_sort_order(sort_order);
    match parent {
        Some(parent) => category.with_parent(parent),
        None => category,
    }
}

/// The three-record example: root A with children B (1) and C (0).
pub fn root_child_other() -> Vec<Category> {
    vec![
        category("A", None, "Root", 2),
        category("B", Some("A"), "Child", 1),
        category("C", Some("A"), "Other", 0),
    ]
}

pub fn ids(forest: &[CategoryNode]) -> Vec<&str> {
    forest.iter().map(CategoryNode::id).collect()
}

/// Every node of a forest, pre-order.
pub fn walk(forest: &[CategoryNode]) -> Vec<&CategoryNode> {
    let mut out = Vec::new();
    let mut stack: Vec<&CategoryNode> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(node.children.iter().rev());
    }
    out
}
