// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across Confidante crates.

use std::collections::BTreeMap;

/// A generic nested config value: mappings, sequences, and scalars.
///
/// Backed by `serde_json::Value` with `preserve_order`, so mapping keys keep
/// the order they were loaded in until the tree is normalized.
pub type ConfigTree = serde_json::Value;

/// A mapping level inside a [`ConfigTree`].
pub type ConfigMap = serde_json::Map<String, ConfigTree>;

/// An explicit environment snapshot.
///
/// Libraries never read the process environment directly; callers pass one of
/// these in. Iteration is in ascending name order.
pub type EnvVars = BTreeMap<String, String>;

/// Snapshot the current process environment.
///
/// Variables whose name or value is not valid Unicode are skipped.
pub fn process_env() -> EnvVars {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

/// Render a key path as `a.b.c` for messages and logs.
pub fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<_>>()
        .join(".")
}
