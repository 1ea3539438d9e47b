//! Category hierarchy: building, searching and viewing the forest.

pub mod builder;
pub mod filter;
pub mod query;
pub mod view;

pub use builder::{build_tree, build_tree_with_report, BuildReport, MAX_DEPTH};
pub use filter::{filter_tree, retain_active};
pub use query::{descendant_ids, eligible_parents, find, TreeStats};
pub use view::{flatten, ExpansionState, TreeRow, Visibility};
