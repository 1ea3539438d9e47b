//! Build, search and inspect product category hierarchies.
//!
//! The category service hands out a flat list of [`Category`] records, each
//! naming its parent. [`build_tree`] turns that list into a forest with
//! siblings ordered by `sort_order`; [`filter_tree`] narrows the forest to
//! the categories matching a search while keeping their ancestors.
//!
//! ```
//! use category_tree::{build_tree, filter_tree, Category};
//!
//! let categories = vec![
//!     Category::new("A", "Root").with_sort_order(2),
//!     Category::new("B", "Child").with_parent("A").with_sort_order(1),
//!     Category::new("C", "Other").with_parent("A").with_sort_order(0),
//! ];
//! let forest = build_tree(&categories);
//! assert_eq!(forest[0].children[0].id(), "C");
//!
//! let found = filter_tree(&forest, "child");
//! assert_eq!(found[0].children.len(), 1);
//! assert_eq!(found[0].children[0].id(), "B");
//! ```

pub use crate::errors::{Error, Result};
pub use crate::model::{forest_len, Category, CategoryInput, CategoryNode};
pub use crate::tree::{build_tree, build_tree_with_report, filter_tree, BuildReport};

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod memo;
pub mod model;
pub mod tree;
