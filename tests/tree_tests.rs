//! Integration tests for building, filtering and viewing category trees.

mod common;

use category_tree::api::{decode_categories, load_categories};
use category_tree::tree::{
    eligible_parents, find, flatten, ExpansionState, TreeStats, Visibility, MAX_DEPTH,
};
use category_tree::{build_tree, build_tree_with_report, filter_tree, forest_len, Error};
use common::{category, fixture, ids, root_child_other, walk};

#[cfg(test)]
mod build_tests {
    use super::*;

    #[test]
    fn children_are_ordered_by_sort_order() {
        let forest = build_tree(&root_child_other());
        assert_eq!(ids(&forest), ["A"]);
        assert_eq!(ids(&forest[0].children), ["C", "B"]);
    }

    #[test]
    fn orphan_becomes_additional_root() {
        let mut categories = root_child_other();
        categories.push(category("D", Some("ZZZ"), "Dangling", 5));
        let (forest, report) = build_tree_with_report(&categories);
        assert_eq!(ids(&forest), ["A", "D"]);
        assert_eq!(report.orphans, ["D"]);
        assert!(report.cycles_broken.is_empty());
    }

    #[test]
    fn building_twice_gives_equal_forests() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        assert_eq!(build_tree(&categories), build_tree(&categories));
    }

    #[test]
    fn catalog_fixture_shape() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        let (forest, report) = build_tree_with_report(&categories);

        assert_eq!(forest_len(&forest), categories.len());
        assert_eq!(ids(&forest), ["el", "ga", "cl"]);
        assert_eq!(ids(&forest[0].children), ["tv", "au"]);
        assert_eq!(ids(&forest[0].children[1].children), ["sp", "hp"]);
        assert_eq!(report.orphans, ["cl"]);
        // "cl" declared level 1 but is a root now.
        assert_eq!(forest[2].category.level, 0);
    }

    #[test]
    fn cycles_are_broken_and_every_record_placed() {
        let categories = load_categories(&fixture("cyclic.json")).unwrap();
        let (forest, report) = build_tree_with_report(&categories);

        assert_eq!(report.cycles_broken, ["x"]);
        assert_eq!(ids(&forest), ["x", "solo"]);
        assert_eq!(forest_len(&forest), 4);
        let order: Vec<&str> = walk(&forest).iter().map(|n| n.id()).collect();
        assert_eq!(order, ["x", "y", "z", "solo"]);
    }

    #[test]
    fn very_deep_chain_builds_and_filters() {
        let len = 200_000;
        let categories: Vec<_> = (0..len)
            .map(|i| {
                let parent = (i > 0).then(|| format!("c{}", i - 1));
                category(&format!("c{i}"), parent.as_deref(), &format!("n{i}"), 0)
            })
            .collect();
        let (forest, report) = build_tree_with_report(&categories);

        assert_eq!(forest_len(&forest), len);
        assert_eq!(report.too_deep.len(), (len - 1) / MAX_DEPTH as usize);
        assert!(walk(&forest).iter().all(|n| n.category.level < MAX_DEPTH));

        let filtered = filter_tree(&forest, "n199999");
        let last_root = format!("c{}", (len - 1) / MAX_DEPTH as usize * MAX_DEPTH as usize);
        assert_eq!(ids(&filtered), [last_root.as_str()]);
        assert_eq!(walk(&filtered).len(), (len - 1) % MAX_DEPTH as usize + 1);
        assert!(find(&filtered, "c199999").is_some());
    }
}

#[cfg(test)]
mod filter_tests {
    use super::*;

    #[test]
    fn search_keeps_ancestor_chain() {
        let forest = build_tree(&root_child_other());
        let filtered = filter_tree(&forest, "child");
        assert_eq!(ids(&filtered), ["A"]);
        assert_eq!(ids(&filtered[0].children), ["B"]);
    }

    #[test]
    fn search_matches_description_and_path() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        let forest = build_tree(&categories);

        let by_description = filter_tree(&forest, "OVER-EAR");
        let hits: Vec<&str> = walk(&by_description).iter().map(|n| n.id()).collect();
        assert_eq!(hits, ["el", "au", "hp"]);

        let by_path = filter_tree(&forest, "/garden/tools");
        let hits: Vec<&str> = walk(&by_path).iter().map(|n| n.id()).collect();
        assert_eq!(hits, ["ga", "to"]);
    }

    #[test]
    fn empty_query_returns_forest_unchanged() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        let forest = build_tree(&categories);
        assert_eq!(filter_tree(&forest, ""), forest);
    }
}

#[cfg(test)]
mod view_tests {
    use super::*;

    #[test]
    fn expanding_one_branch() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        let forest = build_tree(&categories);
        let mut state = ExpansionState::new();
        state.expand("el");

        let rows = flatten(&forest, Visibility::Expanded(&state));
        let shown: Vec<(&str, usize)> = rows
            .iter()
            .map(|r| (r.category.id.as_str(), r.depth))
            .collect();
        assert_eq!(
            shown,
            [("el", 0), ("tv", 1), ("au", 1), ("ga", 0), ("cl", 0)]
        );
        assert!(rows[2].has_children && !rows[2].expanded);
    }

    #[test]
    fn depth_matches_level() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        let forest = build_tree(&categories);
        for row in flatten(&forest, Visibility::All) {
            assert_eq!(row.depth, row.category.level as usize);
        }
    }

    #[test]
    fn parent_choices_and_stats() {
        let categories = load_categories(&fixture("catalog.json")).unwrap();
        let forest = build_tree(&categories);

        let choices: Vec<&str> = eligible_parents(&forest, Some("el"))
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(choices, ["ga", "to", "cl"]);
        assert!(find(&forest, "hp").is_some());

        let stats = TreeStats::collect(&forest);
        assert_eq!(stats.total, 8);
        assert_eq!(stats.roots, 3);
        assert_eq!(stats.inactive, 1);
        assert_eq!(stats.products, 39);
        assert_eq!(stats.max_depth, 2);
    }
}

#[cfg(test)]
mod api_tests {
    use super::*;

    #[test]
    fn failed_response_surfaces_message() {
        let err = load_categories(&fixture("failed.json")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "category service reported a failure: Failed to fetch categories"
        );
    }

    #[test]
    fn malformed_payload_points_at_line() {
        let err = load_categories(&fixture("malformed.json")).unwrap_err();
        match err {
            Error::Json { span, .. } => {
                let text = std::fs::read_to_string(fixture("malformed.json")).unwrap();
                let line = text[..span.offset()].matches('\n').count() + 1;
                assert_eq!(line, 3);
            }
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_categories(&fixture("nope.json")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn bare_and_enveloped_listings_agree() {
        let bare = decode_categories("bare", r#"[{"id": "a", "name": "A"}]"#).unwrap();
        let wrapped = decode_categories(
            "wrapped",
            r#"{"success": true, "categories": [{"id": "a", "name": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(bare, wrapped);
    }
}
