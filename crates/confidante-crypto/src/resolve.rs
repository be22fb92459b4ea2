// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-material resolution.
//!
//! Priority, first match wins:
//! 1. explicit private-key path (asymmetric, with optional passphrase)
//! 2. explicit symmetric key
//! 3. `CONFIDANTE_KEY` in the supplied environment (ignored when empty)
//! 4. interactive prompt, only when requested
//!
//! Nothing resolvable is [`ConfidanteError::NoKeyMaterial`].

use std::path::PathBuf;

use confidante_core::{ConfidanteError, CryptoBackend, EnvVars, KeyPrompt};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::asymmetric::AsymmetricBackend;
use crate::prompt::KEY_ENV_VAR;
use crate::symmetric::SymmetricBackend;

/// Message shown when prompting for a symmetric key.
pub const PROMPT_MESSAGE: &str = "Enter decryption key: ";

/// Caller-supplied key material for an unlock attempt.
///
/// Debug output intentionally omits secrets.
#[derive(Default)]
pub struct KeyMaterial {
    /// PEM private key for the asymmetric backend.
    pub private_key_path: Option<PathBuf>,
    /// Passphrase for an encrypted private key.
    pub passphrase: Option<SecretString>,
    /// Symmetric key.
    pub key: Option<SecretString>,
    /// Allow asking on the terminal when nothing else resolves.
    pub prompt: bool,
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("private_key_path", &self.private_key_path)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("prompt", &self.prompt)
            .finish()
    }
}

impl KeyMaterial {
    /// Material carrying only a symmetric key.
    pub fn symmetric(key: impl Into<String>) -> Self {
        Self {
            key: Some(SecretString::from(key.into())),
            ..Self::default()
        }
    }

    /// Material carrying only a private-key path.
    pub fn private_key(path: impl Into<PathBuf>) -> Self {
        Self {
            private_key_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Attach a passphrase for an encrypted private key.
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(SecretString::from(passphrase.into()));
        self
    }

    /// Allow or forbid interactive prompting.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }
}

/// Build the backend selected by `material`.
pub fn resolve_backend(
    material: &KeyMaterial,
    env: &EnvVars,
    prompt: &dyn KeyPrompt,
) -> Result<Box<dyn CryptoBackend>, ConfidanteError> {
    if let Some(path) = &material.private_key_path {
        debug!(source = "private_key_path", "resolving asymmetric backend");
        let backend = AsymmetricBackend::from_pem_file(path, material.passphrase.as_ref())?;
        return Ok(Box::new(backend));
    }

    if let Some(key) = &material.key {
        debug!(source = "explicit", "resolving symmetric backend");
        return Ok(Box::new(SymmetricBackend::new(key.expose_secret())?));
    }

    if let Some(key) = env.get(KEY_ENV_VAR).filter(|key| !key.is_empty()) {
        debug!(source = KEY_ENV_VAR, "resolving symmetric backend");
        return Ok(Box::new(SymmetricBackend::new(key)?));
    }

    if material.prompt
        && let Some(key) = prompt.prompt_secret(PROMPT_MESSAGE)?
        && !key.expose_secret().is_empty()
    {
        debug!(source = "prompt", "resolving symmetric backend");
        return Ok(Box::new(SymmetricBackend::new(key.expose_secret())?));
    }

    Err(ConfidanteError::NoKeyMaterial)
}
