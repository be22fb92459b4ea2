// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by crypto backends and key prompts.

use secrecy::SecretString;

use crate::error::ConfidanteError;

/// Encrypts and decrypts individual scalar values.
///
/// The tree walker only depends on this trait, so adding a backend never
/// changes how marked values are found or replaced.
pub trait CryptoBackend: Send + Sync + std::fmt::Debug {
    /// Short, stable backend name for logs (`"symmetric"`, `"asymmetric"`).
    fn name(&self) -> &'static str;

    /// Encrypts `plaintext` and returns it marked: `ENC::<base64url>`.
    fn encrypt(&self, plaintext: &str) -> Result<String, ConfidanteError>;

    /// Decrypts the encoded ciphertext found after the marker.
    ///
    /// Fails with [`ConfidanteError::Decryption`] on bad encoding, a wrong
    /// key, corrupted ciphertext, or a value produced by another backend.
    fn decrypt(&self, ciphertext: &str) -> Result<String, ConfidanteError>;
}

/// Source of interactively entered secrets.
pub trait KeyPrompt {
    /// Asks for a secret. Returns `Ok(None)` when no interactive input is
    /// available (for example, stdin is not a terminal).
    fn prompt_secret(&self, message: &str) -> Result<Option<SecretString>, ConfidanteError>;
}

/// A prompt that never has input. Useful for headless callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl KeyPrompt for NoPrompt {
    fn prompt_secret(&self, _message: &str) -> Result<Option<SecretString>, ConfidanteError> {
        Ok(None)
    }
}
