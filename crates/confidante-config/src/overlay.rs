// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-variable overrides.
//!
//! A variable named `<PREFIX>__<seg1>__<seg2>...` sets the value at path
//! `[seg1, seg2, ...]`. Values are always strings; no type coercion is
//! applied. Existing non-mapping values in the way are replaced by fresh
//! mappings, so the environment always wins over file contents.
//!
//! Variables are applied in ascending name order (the order of
//! [`EnvVars`]). When one variable's path is a prefix of another's, the
//! shorter name sorts first, so `P__a__b__c` replaces the scalar set by
//! `P__a__b` with a mapping.

use confidante_core::{ConfigMap, ConfigTree, EnvVars};
use tracing::{debug, warn};

/// Default variable prefix.
pub const DEFAULT_PREFIX: &str = "CONFIDANTE";

/// Separator between the prefix and each path segment.
pub const DELIMITER: &str = "__";

/// Return a copy of `tree` with every matching variable in `env` applied.
pub fn merge(tree: &ConfigTree, env: &EnvVars, prefix: &str) -> ConfigTree {
    let mut merged = tree.clone();
    for (segments, value) in overrides(env, prefix) {
        debug!(path = %segments.join("."), "applying environment override");
        let ConfigTree::Object(root) = ensure_mapping(&mut merged) else {
            continue;
        };
        insert_path(root, &segments, ConfigTree::String(value.to_string()));
    }
    merged
}

/// The variables in `env` that belong to `prefix`, in application order.
///
/// Used to keep only the relevant part of an environment snapshot.
pub fn matching(env: &EnvVars, prefix: &str) -> EnvVars {
    let lead = format!("{prefix}{DELIMITER}");
    env.iter()
        .filter(|(name, _)| name.starts_with(&lead))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn overrides<'a>(
    env: &'a EnvVars,
    prefix: &str,
) -> impl Iterator<Item = (Vec<&'a str>, &'a str)> {
    let lead = format!("{prefix}{DELIMITER}");
    env.iter().filter_map(move |(name, value)| {
        let suffix = name.strip_prefix(lead.as_str())?;
        let segments: Vec<&str> = suffix.split(DELIMITER).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            warn!(variable = %name, "skipping environment override with an empty path segment");
            return None;
        }
        Some((segments, value.as_str()))
    })
}

fn ensure_mapping(node: &mut ConfigTree) -> &mut ConfigTree {
    if !node.is_object() {
        *node = ConfigTree::Object(ConfigMap::new());
    }
    node
}

fn insert_path(map: &mut ConfigMap, segments: &[&str], value: ConfigTree) {
    match segments {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [head, rest @ ..] => {
            let child = ensure_mapping(
                map.entry(*head)
                    .or_insert_with(|| ConfigTree::Object(ConfigMap::new())),
            );
            if let ConfigTree::Object(child) = child {
                insert_path(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(vars: &[(&str, &str)]) -> EnvVars {
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn override_is_a_string_and_siblings_survive() {
        let tree = json!({"service": {"url": "x", "debug": false}});
        let merged = merge(&tree, &env(&[("PREFIX__service__debug", "true")]), "PREFIX");
        assert_eq!(merged, json!({"service": {"url": "x", "debug": "true"}}));
        assert_eq!(tree["service"]["debug"], false, "input untouched");
    }

    #[test]
    fn numbers_are_not_coerced() {
        let merged = merge(&json!({"port": 8080}), &env(&[("CONFIDANTE__port", "9090")]), DEFAULT_PREFIX);
        assert_eq!(merged["port"], "9090");
    }

    #[test]
    fn creates_missing_levels() {
        let merged = merge(&json!({}), &env(&[("CONFIDANTE__db__primary__host", "h")]), DEFAULT_PREFIX);
        assert_eq!(merged, json!({"db": {"primary": {"host": "h"}}}));
    }

    #[test]
    fn scalars_in_the_way_are_replaced() {
        let merged = merge(
            &json!({"db": "sqlite://", "list": [1, 2]}),
            &env(&[("CONFIDANTE__db__host", "h"), ("CONFIDANTE__list__x", "y")]),
            DEFAULT_PREFIX,
        );
        assert_eq!(merged, json!({"db": {"host": "h"}, "list": {"x": "y"}}));
    }

    #[test]
    fn segment_case_is_preserved() {
        let merged = merge(&json!({}), &env(&[("CONFIDANTE__Service__API_Key", "k")]), DEFAULT_PREFIX);
        assert_eq!(merged, json!({"Service": {"API_Key": "k"}}));
    }

    #[test]
    fn non_matching_variables_are_ignored() {
        let tree = json!({"a": 1});
        let vars = env(&[
            ("CONFIDANTE_KEY", "secret"),
            ("confidante__a", "lower"),
            ("OTHER__a", "other"),
            ("CONFIDANTEX__a", "x"),
        ]);
        assert_eq!(merge(&tree, &vars, DEFAULT_PREFIX), tree);
    }

    #[test]
    fn empty_segments_are_skipped() {
        let vars = env(&[
            ("CONFIDANTE__", "root"),
            ("CONFIDANTE__a____b", "gap"),
            ("CONFIDANTE__c__", "trailing"),
            ("CONFIDANTE__ok", "yes"),
        ]);
        assert_eq!(merge(&json!({}), &vars, DEFAULT_PREFIX), json!({"ok": "yes"}));
    }

    #[test]
    fn overlapping_paths_apply_in_name_order() {
        let vars = env(&[("P__a__b__c", "deep"), ("P__a__b", "shallow")]);
        let merged = merge(&json!({}), &vars, "P");
        assert_eq!(merged, json!({"a": {"b": {"c": "deep"}}}));
    }

    #[test]
    fn matching_keeps_only_prefixed_variables() {
        let vars = env(&[("CONFIDANTE_KEY", "secret"), ("CONFIDANTE__a", "1"), ("PATH", "/bin")]);
        let kept = matching(&vars, DEFAULT_PREFIX);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept["CONFIDANTE__a"], "1");
    }
}
