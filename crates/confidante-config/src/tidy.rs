// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical key ordering for deterministic output.

use confidante_core::ConfigTree;

/// Return a copy of `tree` with every mapping's keys in ascending order.
///
/// Sequences keep their element order; each element is normalized in turn.
/// Scalars are copied unchanged. Total and idempotent.
pub fn normalize(tree: &ConfigTree) -> ConfigTree {
    match tree {
        ConfigTree::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            ConfigTree::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), normalize(value)))
                    .collect(),
            )
        }
        ConfigTree::Array(items) => ConfigTree::Array(items.iter().map(normalize).collect()),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidante_test_utils::strategy::{arb_tree, same_shape};
    use proptest::prelude::*;
    use serde_json::json;

    fn keys(tree: &ConfigTree) -> Vec<&str> {
        tree.as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn keys_strictly_ascending(tree: &ConfigTree) -> bool {
        match tree {
            ConfigTree::Object(map) => {
                map.keys().zip(map.keys().skip(1)).all(|(a, b)| a < b)
                    && map.values().all(keys_strictly_ascending)
            }
            ConfigTree::Array(items) => items.iter().all(keys_strictly_ascending),
            _ => true,
        }
    }

    #[test]
    fn sorts_keys_at_every_level() {
        let tidy = normalize(&json!({"z": 1, "a": 2, "m": {"c": 3, "b": 4}}));
        assert_eq!(keys(&tidy), ["a", "m", "z"]);
        assert_eq!(keys(&tidy["m"]), ["b", "c"]);
    }

    #[test]
    fn sorts_mappings_inside_sequences_without_reordering_elements() {
        let tidy = normalize(&json!({"list": [{"y": 1, "x": 2}, 3, "b", "a"]}));
        assert_eq!(keys(&tidy["list"][0]), ["x", "y"]);
        assert_eq!(tidy["list"], json!([{"x": 2, "y": 1}, 3, "b", "a"]));
    }

    #[test]
    fn ordering_is_by_code_point() {
        let tidy = normalize(&json!({"b": 1, "B": 2, "é": 3, "a": 4}));
        assert_eq!(keys(&tidy), ["B", "a", "b", "é"]);
    }

    #[test]
    fn scalars_pass_through() {
        for scalar in [json!(null), json!(true), json!(1.5), json!("x")] {
            assert_eq!(normalize(&scalar), scalar);
        }
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(tree in arb_tree()) {
            let once = normalize(&tree);
            let twice = normalize(&once);
            prop_assert!(keys_strictly_ascending(&once));
            prop_assert_eq!(
                serde_json::to_string(&once).unwrap(),
                serde_json::to_string(&twice).unwrap()
            );
        }

        #[test]
        fn normalize_preserves_shape_and_values(tree in arb_tree()) {
            let tidy = normalize(&tree);
            prop_assert!(same_shape(&tree, &tidy));
            prop_assert_eq!(tidy, tree);
        }
    }
}
