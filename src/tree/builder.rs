//! Flat list → forest.
//!
//! Records are indexed by id, linked to their parents, and assembled
//! into owned [`CategoryNode`]s with siblings sorted by `sort_order`.
//! Unknown parents, `parent_id` cycles and chains deeper than
//! [`MAX_DEPTH`] never fail the build: the affected records become roots
//! and are listed in the [`BuildReport`].

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::model::{Category, CategoryNode};

/// Number of levels a built tree may have. A record that would sit at
/// level `MAX_DEPTH` starts a new root instead, so every tree walk stays
/// within a bounded stack.
pub const MAX_DEPTH: u32 = 256;

/// Anomalies found while building a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Records whose `parent_id` names no known category.
    pub orphans: Vec<String>,
    /// Records promoted to root to break a `parent_id` cycle.
    pub cycles_broken: Vec<String>,
    /// Ids seen more than once; only the first record was kept.
    pub duplicates: Vec<String>,
    /// Records detached from their parent because the chain above them
    /// already spans [`MAX_DEPTH`] levels.
    pub too_deep: Vec<String>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty()
            && self.cycles_broken.is_empty()
            && self.duplicates.is_empty()
            && self.too_deep.is_empty()
    }
}

/// Builds the sorted category forest from a flat listing.
pub fn build_tree(categories: &[Category]) -> Vec<CategoryNode> {
    build_tree_with_report(categories).0
}

/// Like [`build_tree`], also returning what had to be repaired.
pub fn build_tree_with_report(categories: &[Category]) -> (Vec<CategoryNode>, BuildReport) {
    let mut report = BuildReport::default();
    let Links {
        mut roots,
        children,
    } = Links::resolve(categories, &mut report);

    sort_positions(&mut roots, categories);
    let forest: Vec<CategoryNode> = roots
        .iter()
        .map(|&pos| assemble(pos, 0, categories, &children))
        .collect();

    tracing::debug!(
        records = categories.len(),
        roots = forest.len(),
        orphans = report.orphans.len(),
        cycles_broken = report.cycles_broken.len(),
        duplicates = report.duplicates.len(),
        too_deep = report.too_deep.len(),
        "built category tree"
    );
    (forest, report)
}

// ============================================================================
// LINK RESOLUTION
// ============================================================================

/// Parent/child links between input positions, cycles already cut.
struct Links {
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
}

impl Links {
    fn resolve(categories: &[Category], report: &mut BuildReport) -> Self {
        let len = categories.len();

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(len);
        let mut kept = Vec::with_capacity(len);
        for (pos, category) in categories.iter().enumerate() {
            if index.contains_key(category.id.as_str()) {
                tracing::warn!(id = %category.id, "duplicate category id, keeping the first record");
                report.duplicates.push(category.id.clone());
                continue;
            }
            index.insert(category.id.as_str(), pos);
            kept.push(pos);
        }

        let mut parent: Vec<Option<usize>> = vec![None; len];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); len];
        let mut roots = Vec::new();
        for &pos in &kept {
            let category = &categories[pos];
            match category.parent() {
                None => roots.push(pos),
                Some(parent_id) => match index.get(parent_id) {
                    Some(&parent_pos) => {
                        parent[pos] = Some(parent_pos);
                        children[parent_pos].push(pos);
                    }
                    None => {
                        tracing::warn!(
                            id = %category.id,
                            parent_id,
                            "parent not found, promoting category to root"
                        );
                        report.orphans.push(category.id.clone());
                        roots.push(pos);
                    }
                },
            }
        }

        let mut placed = vec![false; len];
        for &root in &roots {
            mark_subtree(root, &children, &mut placed);
        }

        // Whatever is still unplaced hangs off a cycle. Walk up from the
        // first such record until a record repeats; that one is in the
        // cycle and becomes a root.
        for &pos in &kept {
            if placed[pos] {
                continue;
            }
            let mut seen = HashSet::new();
            let mut current = pos;
            while seen.insert(current) {
                match parent[current] {
                    Some(up) if !placed[up] => current = up,
                    _ => break,
                }
            }

            if let Some(up) = parent[current].take() {
                children[up].retain(|&child| child != current);
            }
            let id = &categories[current].id;
            tracing::warn!(id = %id, "parent chain forms a cycle, promoting category to root");
            report.cycles_broken.push(id.clone());
            roots.push(current);
            mark_subtree(current, &children, &mut placed);
        }

        limit_depth(categories, &mut roots, &mut children, report);
        Self { roots, children }
    }
}

/// Cuts every chain at [`MAX_DEPTH`] levels; the cut-off records become roots.
fn limit_depth(
    categories: &[Category],
    roots: &mut Vec<usize>,
    children: &mut [Vec<usize>],
    report: &mut BuildReport,
) {
    let mut queue: VecDeque<(usize, u32)> = roots.iter().map(|&root| (root, 0)).collect();
    while let Some((pos, depth)) = queue.pop_front() {
        if depth + 1 < MAX_DEPTH {
            queue.extend(children[pos].iter().map(|&child| (child, depth + 1)));
            continue;
        }
        for child in std::mem::take(&mut children[pos]) {
            let id = &categories[child].id;
            tracing::warn!(id = %id, max_depth = MAX_DEPTH, "category nested too deeply, promoting to root");
            report.too_deep.push(id.clone());
            roots.push(child);
            queue.push_back((child, 0));
        }
    }
}

fn mark_subtree(root: usize, children: &[Vec<usize>], placed: &mut [bool]) {
    let mut stack = vec![root];
    while let Some(pos) = stack.pop() {
        if placed[pos] {
            continue;
        }
        placed[pos] = true;
        stack.extend(children[pos].iter().copied());
    }
}

// ============================================================================
// ASSEMBLY
// ============================================================================

/// Stable sort, so equal `sort_order` keeps input order.
fn sort_positions(positions: &mut [usize], categories: &[Category]) {
    positions.sort_by_key(|&pos| categories[pos].sort_order);
}

fn assemble(
    pos: usize,
    depth: u32,
    categories: &[Category],
    children: &[Vec<usize>],
) -> CategoryNode {
    let mut order = children[pos].clone();
    sort_positions(&mut order, categories);

    let mut category = categories[pos].clone();
    category.level = depth;

    CategoryNode {
        category,
        children: order
            .into_iter()
            .map(|child| assemble(child, depth + 1, categories, children))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(forest: &[CategoryNode]) -> Vec<&str> {
        forest.iter().map(CategoryNode::id).collect()
    }

    #[test]
    fn children_before_parents_in_input() {
        let categories = vec![
            Category::new("c", "Child").with_parent("p"),
            Category::new("p", "Parent"),
        ];
        let forest = build_tree(&categories);
        assert_eq!(ids(&forest), ["p"]);
        assert_eq!(ids(&forest[0].children), ["c"]);
    }

    #[test]
    fn equal_sort_order_keeps_input_order() {
        let categories = vec![
            Category::new("b", "B"),
            Category::new("a", "A"),
            Category::new("z", "Z").with_sort_order(-1),
        ];
        assert_eq!(ids(&build_tree(&categories)), ["z", "b", "a"]);
    }

    #[test]
    fn levels_follow_depth() {
        let categories = vec![
            Category::new("a", "A"),
            Category::new("b", "B").with_parent("a"),
            Category::new("c", "C").with_parent("b"),
            Category::new("o", "Orphan").with_parent("missing"),
        ];
        let forest = build_tree(&categories);
        assert_eq!(forest[0].category.level, 0);
        assert_eq!(forest[0].children[0].category.level, 1);
        assert_eq!(forest[0].children[0].children[0].category.level, 2);
        assert_eq!(forest[1].category.level, 0);
    }

    #[test]
    fn self_parent_is_promoted() {
        let categories = vec![Category::new("a", "A").with_parent("a")];
        let (forest, report) = build_tree_with_report(&categories);
        assert_eq!(ids(&forest), ["a"]);
        assert!(forest[0].children.is_empty());
        assert_eq!(report.cycles_broken, ["a"]);
    }

    #[test]
    fn cycle_member_is_promoted_not_its_dependant() {
        // a <-> b cycle, c hangs off a and comes first in the input.
        let categories = vec![
            Category::new("c", "C").with_parent("a"),
            Category::new("a", "A").with_parent("b"),
            Category::new("b", "B").with_parent("a"),
        ];
        let (forest, report) = build_tree_with_report(&categories);
        assert_eq!(report.cycles_broken, ["a"]);
        assert_eq!(ids(&forest), ["a"]);
        let mut under_a = ids(&forest[0].children);
        under_a.sort_unstable();
        assert_eq!(under_a, ["b", "c"]);
    }

    #[test]
    fn duplicates_keep_first_record() {
        let categories = vec![
            Category::new("a", "First"),
            Category::new("a", "Second"),
        ];
        let (forest, report) = build_tree_with_report(&categories);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].category.name, "First");
        assert_eq!(report.duplicates, ["a"]);
    }

    #[test]
    fn clean_input_has_clean_report() {
        let categories = vec![Category::new("a", "A"), Category::new("b", "B").with_parent("a")];
        assert!(build_tree_with_report(&categories).1.is_clean());
    }

    #[test]
    fn long_chain_is_cut_at_max_depth() {
        let len = MAX_DEPTH as usize * 2 + 10;
        let categories: Vec<Category> = (0..len)
            .map(|i| {
                let category = Category::new(format!("c{i}"), format!("n{i}"));
                if i == 0 {
                    category
                } else {
                    category.with_parent(format!("c{}", i - 1))
                }
            })
            .collect();
        let (forest, report) = build_tree_with_report(&categories);

        let first_cut = format!("c{MAX_DEPTH}");
        let second_cut = format!("c{}", MAX_DEPTH * 2);
        assert_eq!(report.too_deep, [first_cut.as_str(), second_cut.as_str()]);
        assert!(!report.is_clean());
        assert_eq!(ids(&forest), ["c0", first_cut.as_str(), second_cut.as_str()]);
        assert_eq!(crate::model::forest_len(&forest), len);
        assert_eq!(forest[1].category.level, 0);
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        let (forest, report) = build_tree_with_report(&[]);
        assert!(forest.is_empty());
        assert!(report.is_clean());
    }
}
