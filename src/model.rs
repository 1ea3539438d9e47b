//! Category data model.
//!
//! `Category` mirrors the record served by the category endpoints
//! (camelCase JSON). `CategoryNode` is the same record placed in a tree.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A product category as delivered by the category service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub path: String,
    /// Depth in the hierarchy, roots are 0.
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub product_count: u64,
}

fn default_active() -> bool {
    true
}

impl Category {
    /// Minimal root category; remaining fields take their defaults.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            name: name.into(),
            description: String::new(),
            path: String::new(),
            level: 0,
            sort_order: 0,
            is_active: true,
            product_count: 0,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_product_count(mut self, product_count: u64) -> Self {
        self.product_count = product_count;
        self
    }

    /// The declared parent id, treating an empty string as "no parent".
    pub fn parent(&self) -> Option<&str> {
        self.parent_id.as_deref().filter(|p| !p.is_empty())
    }

    /// Case-insensitive substring match against name, description and path.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.path]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// A category together with its sorted children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn leaf(category: Category) -> Self {
        Self {
            category,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.category.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether `query` occurs in this node's name, description or path,
    /// ignoring case. Children are not consulted.
    pub fn matches(&self, query: &str) -> bool {
        self.category.matches_lowercase(&query.to_lowercase())
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::subtree_len).sum::<usize>()
    }
}

/// Total node count of a forest.
pub fn forest_len(forest: &[CategoryNode]) -> usize {
    forest.iter().map(CategoryNode::subtree_len).sum()
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parent_id: None,
            sort_order: 0,
            is_active: true,
        }
    }

    /// Prefills the edit form from an existing category.
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            parent_id: category.parent().map(str::to_string),
            sort_order: category.sort_order,
            is_active: category.is_active,
        }
    }

    /// Checks the payload before it is sent.
    ///
    /// `editing` is the id of the category being updated, if any.
    pub fn validate(&self, editing: Option<&str>) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid_input("name must not be empty"));
        }
        if let (Some(parent), Some(id)) = (self.parent_id.as_deref(), editing) {
            if parent == id {
                return Err(Error::invalid_input(format!(
                    "category '{id}' cannot be its own parent"
                )));
            }
        }
        Ok(())
    }
}
