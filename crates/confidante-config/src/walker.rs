// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finding and transforming marked values in a config tree.
//!
//! The walker only talks to [`CryptoBackend`], so it works the same for
//! every backend. All functions return new trees; inputs are never mutated,
//! so a failed pass leaves the caller's tree intact.

use confidante_core::{
    ConfidanteError, ConfigMap, ConfigTree, CryptoBackend, display_path, is_marked, strip_marker,
};
use tracing::debug;

/// True if any string scalar anywhere in `tree` carries the marker.
///
/// Short-circuits on the first hit.
pub fn has_marked_value(tree: &ConfigTree) -> bool {
    match tree {
        ConfigTree::String(value) => is_marked(value),
        ConfigTree::Array(items) => items.iter().any(has_marked_value),
        ConfigTree::Object(map) => map.values().any(has_marked_value),
        _ => false,
    }
}

/// Return a copy of `tree` with every marked string replaced by its
/// decryption.
///
/// Structure is rebuilt as-is: the same mapping keys in the same order and
/// the same sequence lengths. Fails on the first value that does not
/// decrypt; the error names the offending key path.
pub fn decrypt_tree(
    tree: &ConfigTree,
    backend: &dyn CryptoBackend,
) -> Result<ConfigTree, ConfidanteError> {
    let mut trail = Vec::new();
    let decrypted = decrypt_node(tree, backend, &mut trail)?;
    debug!(backend = backend.name(), "decrypted config tree");
    Ok(decrypted)
}

fn decrypt_node(
    node: &ConfigTree,
    backend: &dyn CryptoBackend,
    trail: &mut Vec<String>,
) -> Result<ConfigTree, ConfidanteError> {
    match node {
        ConfigTree::String(value) => match strip_marker(value) {
            Some(ciphertext) => backend
                .decrypt(ciphertext)
                .map(ConfigTree::String)
                .map_err(|e| match e {
                    ConfidanteError::Decryption(message) => {
                        ConfidanteError::Decryption(format!("at `{}`: {message}", display_path(trail.as_slice())))
                    }
                    other => other,
                }),
            None => Ok(node.clone()),
        },
        ConfigTree::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                trail.push(index.to_string());
                out.push(decrypt_node(item, backend, trail)?);
                trail.pop();
            }
            Ok(ConfigTree::Array(out))
        }
        ConfigTree::Object(map) => {
            let mut out = ConfigMap::with_capacity(map.len());
            for (key, value) in map {
                trail.push(key.clone());
                out.insert(key.clone(), decrypt_node(value, backend, trail)?);
                trail.pop();
            }
            Ok(ConfigTree::Object(out))
        }
        scalar => Ok(scalar.clone()),
    }
}

/// Return a copy of `tree` with `backend.encrypt(plaintext)` stored at
/// `path`, creating empty mappings for missing intermediate keys.
pub fn encrypt_at<S: AsRef<str>>(
    tree: &ConfigTree,
    path: &[S],
    plaintext: &str,
    backend: &dyn CryptoBackend,
) -> Result<ConfigTree, ConfidanteError> {
    check_path(path)?;
    let mut out = tree.clone();
    set_at(&mut out, path, ConfigTree::String(backend.encrypt(plaintext)?))?;
    debug!(path = %display_path(path), backend = backend.name(), "encrypted value");
    Ok(out)
}

/// Store `value` at `path` in place, creating empty mappings for missing
/// intermediate keys.
///
/// Refuses to walk through an existing non-mapping value. On error `tree`
/// is unchanged.
pub fn set_at<S: AsRef<str>>(
    tree: &mut ConfigTree,
    path: &[S],
    value: ConfigTree,
) -> Result<(), ConfidanteError> {
    check_path(path)?;
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => return Err(ConfidanteError::InvalidPath("key path is empty".to_string())),
    };

    // Check the walk before creating anything; on conflict the tree is untouched.
    let mut probe = Some(&*tree);
    for depth in 0..=parents.len() {
        let Some(node) = probe else { break };
        if !node.is_object() {
            return Err(conflict(path, depth));
        }
        probe = parents.get(depth).and_then(|segment| node.get(segment.as_ref()));
    }

    let mut current = tree;
    for (depth, segment) in parents.iter().enumerate() {
        let ConfigTree::Object(map) = current else {
            return Err(conflict(path, depth));
        };
        current = map
            .entry(segment.as_ref())
            .or_insert_with(|| ConfigTree::Object(ConfigMap::new()));
    }
    match current {
        ConfigTree::Object(map) => {
            map.insert(last.as_ref().to_string(), value);
            Ok(())
        }
        _ => Err(conflict(path, parents.len())),
    }
}

fn check_path<S: AsRef<str>>(path: &[S]) -> Result<(), ConfidanteError> {
    if path.is_empty() {
        return Err(ConfidanteError::InvalidPath("key path is empty".to_string()));
    }
    if path.iter().any(|segment| segment.as_ref().is_empty()) {
        return Err(ConfidanteError::InvalidPath(format!(
            "key path `{}` has an empty component",
            display_path(path)
        )));
    }
    Ok(())
}

/// The value at `path[..depth]` is not a mapping.
fn conflict<S: AsRef<str>>(path: &[S], depth: usize) -> ConfidanteError {
    let at = match depth {
        0 => "<root>".to_string(),
        _ => display_path(&path[..depth]),
    };
    ConfidanteError::PathConflict {
        path: display_path(path),
        at,
    }
}
