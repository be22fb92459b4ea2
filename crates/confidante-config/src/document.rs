// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The config document and its locked/unlocked lifecycle.
//!
//! A document keeps two trees:
//!
//! - the *stored* tree: what the file contains, ciphertext markers and all,
//!   plus any values set through [`ConfigDocument::encrypt_value`]. This is
//!   the only tree ever written back to disk.
//! - the *resolved* tree: stored + environment overrides + (once unlocked)
//!   decrypted values. This is what readers see.
//!
//! Decrypted plaintext and overlay values therefore never reach the file.

use std::path::{Path, PathBuf};

use confidante_core::{ConfidanteError, ConfigTree, CryptoBackend, EnvVars, KeyPrompt, process_env};
use confidante_crypto::{KeyMaterial, TtyPrompt, resolve_backend};
use tracing::{debug, info};

use crate::format::{ConfigFormat, format_for_path};
use crate::overlay;
use crate::tidy::normalize;
use crate::view::ConfigView;
use crate::walker::{decrypt_tree, encrypt_at, has_marked_value};

/// Environment overrides captured at load time.
#[derive(Debug, Clone)]
struct Overlay {
    vars: EnvVars,
    prefix: String,
}

/// A loaded config file.
///
/// Starts locked. [`unlock`](Self::unlock) establishes a crypto backend and
/// decrypts every marked value; it is a no-op once the document is
/// unlocked.
pub struct ConfigDocument {
    path: PathBuf,
    format: Box<dyn ConfigFormat>,
    stored: ConfigTree,
    resolved: ConfigTree,
    overlay: Option<Overlay>,
    backend: Option<Box<dyn CryptoBackend>>,
}

impl std::fmt::Debug for ConfigDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDocument")
            .field("path", &self.path)
            .field("format", &self.format.name())
            .field("overlay", &self.overlay.as_ref().map(|o| o.vars.len()))
            .field("backend", &self.backend_kind())
            .finish_non_exhaustive()
    }
}

impl ConfigDocument {
    /// Load `path`, choosing the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfidanteError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfidanteError::Load {
                path: path.to_path_buf(),
                message: "config file not found".to_string(),
            });
        }
        let format = format_for_path(path)?;
        let tree = format.load(path)?;
        Ok(Self::from_tree(tree, path, format))
    }

    /// Load `path` and apply `<prefix>__a__b` overrides from `env`.
    ///
    /// Only variables under `prefix` are retained by the document.
    pub fn load_with_env(
        path: impl AsRef<Path>,
        env: &EnvVars,
        prefix: &str,
    ) -> Result<Self, ConfidanteError> {
        let mut doc = Self::load(path)?;
        let vars = overlay::matching(env, prefix);
        debug!(count = vars.len(), prefix, "captured environment overrides");
        doc.resolved = overlay::merge(&doc.stored, &vars, prefix);
        doc.overlay = Some(Overlay {
            vars,
            prefix: prefix.to_string(),
        });
        Ok(doc)
    }

    /// Wrap an already-parsed tree. `path` and `format` are used by
    /// [`persist`](Self::persist).
    pub fn from_tree(
        tree: ConfigTree,
        path: impl Into<PathBuf>,
        format: Box<dyn ConfigFormat>,
    ) -> Self {
        Self {
            path: path.into(),
            format,
            resolved: tree.clone(),
            stored: tree,
            overlay: None,
            backend: None,
        }
    }

    /// Unlock using the process environment and, if `material.prompt` is
    /// set, the terminal.
    pub fn unlock(&mut self, material: KeyMaterial) -> Result<(), ConfidanteError> {
        if self.is_unlocked() {
            return Ok(());
        }
        self.unlock_with(&material, &process_env(), &TtyPrompt)
    }

    /// Unlock with an injected environment and prompt.
    ///
    /// On any failure the document stays locked and its trees are unchanged.
    pub fn unlock_with(
        &mut self,
        material: &KeyMaterial,
        env: &EnvVars,
        prompt: &dyn KeyPrompt,
    ) -> Result<(), ConfidanteError> {
        if self.is_unlocked() {
            debug!(path = %self.path.display(), "already unlocked");
            return Ok(());
        }
        let backend = resolve_backend(material, env, prompt)?;
        let resolved = if has_marked_value(&self.resolved) {
            decrypt_tree(&self.resolved, backend.as_ref())?
        } else {
            self.resolved.clone()
        };
        info!(path = %self.path.display(), backend = backend.name(), "configuration unlocked");
        self.resolved = resolved;
        self.backend = Some(backend);
        Ok(())
    }

    /// Encrypt `plaintext` and store it at `key_path`.
    ///
    /// The stored tree receives the ciphertext; the resolved tree is
    /// recomputed so readers see the plaintext (unless an environment
    /// override shadows it).
    pub fn encrypt_value<S: AsRef<str>>(
        &mut self,
        key_path: &[S],
        plaintext: &str,
    ) -> Result<(), ConfidanteError> {
        let backend = self.backend.as_deref().ok_or(ConfidanteError::NotUnlocked)?;
        let stored = encrypt_at(&self.stored, key_path, plaintext, backend)?;
        let resolved = self.resolve(&stored, backend)?;
        self.stored = stored;
        self.resolved = resolved;
        Ok(())
    }

    /// Write the stored tree back to the file in its native format.
    pub fn persist(&self) -> Result<(), ConfidanteError> {
        self.format.dump(&self.stored, &self.path)?;
        info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Sort mapping keys at every level, in both trees.
    pub fn normalize(&mut self) {
        self.stored = normalize(&self.stored);
        self.resolved = normalize(&self.resolved);
    }

    /// [`normalize`](Self::normalize) then [`persist`](Self::persist).
    pub fn tidy(&mut self) -> Result<(), ConfidanteError> {
        self.normalize();
        self.persist()
    }

    pub fn is_unlocked(&self) -> bool {
        self.backend.is_some()
    }

    /// The resolved tree: overrides applied and, once unlocked, decrypted.
    pub fn tree(&self) -> &ConfigTree {
        &self.resolved
    }

    /// The tree as it is (or will be) written to disk.
    pub fn stored_tree(&self) -> &ConfigTree {
        &self.stored
    }

    /// Read-only accessor over the resolved tree.
    pub fn config(&self) -> ConfigView<'_> {
        ConfigView::new(&self.resolved)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the active backend, `None` while locked.
    pub fn backend_kind(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }

    fn resolve(
        &self,
        stored: &ConfigTree,
        backend: &dyn CryptoBackend,
    ) -> Result<ConfigTree, ConfidanteError> {
        let merged = match &self.overlay {
            Some(overlay) => overlay::merge(stored, &overlay.vars, &overlay.prefix),
            None => stored.clone(),
        };
        if has_marked_value(&merged) {
            decrypt_tree(&merged, backend)
        } else {
            Ok(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::JsonFormat;
    use confidante_core::NoPrompt;
    use confidante_test_utils::MockBackend;
    use serde_json::json;

    fn doc(tree: ConfigTree) -> ConfigDocument {
        ConfigDocument::from_tree(tree, "unused.json", Box::new(JsonFormat))
    }

    #[test]
    fn starts_locked() {
        let doc = doc(json!({"a": 1}));
        assert!(!doc.is_unlocked());
        assert_eq!(doc.backend_kind(), None);
        assert_eq!(doc.tree(), doc.stored_tree());
    }

    #[test]
    fn encrypt_before_unlock_is_refused() {
        let mut doc = doc(json!({}));
        let err = doc.encrypt_value(&["a"], "x").unwrap_err();
        assert!(matches!(err, ConfidanteError::NotUnlocked));
        assert_eq!(doc.stored_tree(), &json!({}));
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut doc = doc(json!({"a": 1}));
        let material = KeyMaterial::symmetric("k1");
        doc.unlock_with(&material, &EnvVars::new(), &NoPrompt).unwrap();
        assert_eq!(doc.backend_kind(), Some("symmetric"));

        // Second call ignores its arguments entirely.
        doc.unlock_with(&KeyMaterial::default(), &EnvVars::new(), &NoPrompt)
            .unwrap();
        assert!(doc.is_unlocked());
    }

    #[test]
    fn failed_key_resolution_leaves_document_locked() {
        let mut doc = doc(json!({"a": 1}));
        let err = doc
            .unlock_with(&KeyMaterial::default(), &EnvVars::new(), &NoPrompt)
            .unwrap_err();
        assert!(matches!(err, ConfidanteError::NoKeyMaterial));
        assert!(!doc.is_unlocked());
    }

    #[test]
    fn encrypted_value_is_plain_in_resolved_and_marked_in_stored() {
        let mut doc = doc(json!({"service": {"url": "x"}}));
        doc.backend = Some(Box::new(MockBackend::new()));
        doc.encrypt_value(&["credentials", "api_key"], "supersecret")
            .unwrap();

        assert_eq!(doc.tree()["credentials"]["api_key"], "supersecret");
        let stored = doc.stored_tree()["credentials"]["api_key"].as_str().unwrap();
        assert!(confidante_core::is_marked(stored));
    }

    #[test]
    fn path_conflict_changes_nothing() {
        let original = json!({"service": {"url": "x"}});
        let mut doc = doc(original.clone());
        doc.backend = Some(Box::new(MockBackend::new()));
        let err = doc.encrypt_value(&["service", "url", "x"], "v").unwrap_err();
        assert!(matches!(err, ConfidanteError::PathConflict { .. }));
        assert_eq!(doc.stored_tree(), &original);
        assert_eq!(doc.tree(), &original);
    }

    #[test]
    fn normalize_sorts_both_trees() {
        let mut doc = doc(json!({"z": 1, "a": {"d": 1, "c": 2}}));
        doc.normalize();
        let keys: Vec<_> = doc.config().keys().collect();
        assert_eq!(keys, ["a", "z"]);
        let stored: Vec<_> = doc.stored_tree().as_object().unwrap().keys().cloned().collect();
        assert_eq!(stored, ["a", "z"]);
    }

    #[test]
    fn debug_does_not_dump_tree_contents() {
        let doc = doc(json!({"password": "hunter2"}));
        let out = format!("{doc:?}");
        assert!(!out.contains("hunter2"));
        assert!(out.contains("unused.json"));
    }
}
