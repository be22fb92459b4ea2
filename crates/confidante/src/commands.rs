// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Each handler returns a [`ConfidanteError`] for the caller to render;
//! results go to stdout.

use std::path::Path;

use confidante_config::ConfigDocument;
use confidante_core::{ConfidanteError, EnvVars};
use confidante_crypto::{KeyMaterial, TtyPrompt, generate_symmetric_key};
use secrecy::ExposeSecret;
use tracing::debug;

/// Print the document as pretty JSON, optionally overlaid and decrypted.
pub fn load(
    path: &Path,
    material: Option<&KeyMaterial>,
    env_prefix: Option<&str>,
    env: &EnvVars,
) -> Result<(), ConfidanteError> {
    let mut doc = match env_prefix {
        Some(prefix) => ConfigDocument::load_with_env(path, env, prefix)?,
        None => ConfigDocument::load(path)?,
    };
    if let Some(material) = material {
        doc.unlock_with(material, env, &TtyPrompt)?;
    }
    let json = serde_json::to_string_pretty(doc.tree()).map_err(|e| ConfidanteError::Persist {
        path: "<stdout>".into(),
        message: e.to_string(),
    })?;
    println!("{json}");
    Ok(())
}

pub fn tidy(path: &Path) -> Result<(), ConfidanteError> {
    let mut doc = ConfigDocument::load(path)?;
    doc.tidy()?;
    println!("Configuration file tidied successfully.");
    Ok(())
}

/// Unlock without writing anything; succeeds only if every value decrypts.
pub fn unlock(path: &Path, material: &KeyMaterial, env: &EnvVars) -> Result<(), ConfidanteError> {
    let mut doc = ConfigDocument::load(path)?;
    doc.unlock_with(material, env, &TtyPrompt)?;
    println!("Configuration unlocked.");
    Ok(())
}

/// `args` is the key path followed by the value.
pub fn encrypt_key(
    path: &Path,
    args: &[String],
    material: &KeyMaterial,
    env: &EnvVars,
) -> Result<(), ConfidanteError> {
    let Some((value, key_path)) = args.split_last() else {
        return Err(ConfidanteError::InvalidPath("key path is empty".to_string()));
    };
    let mut doc = ConfigDocument::load(path)?;
    doc.unlock_with(material, env, &TtyPrompt)?;
    doc.encrypt_value(key_path, value)?;
    doc.persist()?;
    println!("Secret encrypted and saved.");
    Ok(())
}

/// Parse the file with the format its extension selects.
pub fn validate(path: &Path) -> Result<(), ConfidanteError> {
    let doc = ConfigDocument::load(path)?;
    debug!(keys = doc.config().keys().count(), "parsed top-level keys");
    println!("Configuration is valid.");
    Ok(())
}

pub fn keygen() -> Result<(), ConfidanteError> {
    let key = generate_symmetric_key()?;
    println!("{}", key.expose_secret());
    Ok(())
}
