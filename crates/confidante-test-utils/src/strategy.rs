// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Proptest strategies for arbitrary config trees.

use confidante_core::{ConfigMap, ConfigTree};
use proptest::prelude::*;

/// Scalar leaves: null, booleans, integers, and short strings.
pub fn arb_scalar() -> impl Strategy<Value = ConfigTree> {
    prop_oneof![
        Just(ConfigTree::Null),
        any::<bool>().prop_map(ConfigTree::Bool),
        any::<i64>().prop_map(ConfigTree::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(ConfigTree::String),
    ]
}

/// Nested trees up to four levels deep with a mapping at the root.
pub fn arb_tree() -> impl Strategy<Value = ConfigTree> {
    let node = arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(ConfigTree::Array),
            prop::collection::vec(("[a-zA-Z_]{1,6}", inner), 0..6)
                .prop_map(|entries| ConfigTree::Object(entries.into_iter().collect())),
        ]
    });
    prop::collection::vec(("[a-zA-Z_]{1,6}", node), 0..8)
        .prop_map(|entries| ConfigTree::Object(entries.into_iter().collect::<ConfigMap>()))
}

/// True when `a` and `b` have the same mapping key sets and sequence
/// lengths at every level. Key order and leaf values are ignored.
pub fn same_shape(a: &ConfigTree, b: &ConfigTree) -> bool {
    match (a, b) {
        (ConfigTree::Object(x), ConfigTree::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, value)| y.get(key).is_some_and(|other| same_shape(value, other)))
        }
        (ConfigTree::Array(x), ConfigTree::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| same_shape(l, r))
        }
        (ConfigTree::Object(_) | ConfigTree::Array(_), _)
        | (_, ConfigTree::Object(_) | ConfigTree::Array(_)) => false,
        _ => true,
    }
}
