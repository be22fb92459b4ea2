// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Confidante.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// The error type shared by every Confidante crate.
///
/// All errors are terminal for the operation in progress. Nothing in the
/// libraries retries; the caller decides whether to prompt again or abort.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfidanteError {
    /// The config file is missing, unreadable, or rejected by its format.
    #[error("failed to load {}: {message}", path.display())]
    #[diagnostic(code(confidante::load))]
    Load {
        /// File that was being read.
        path: PathBuf,
        /// What went wrong, as reported by the filesystem or the parser.
        message: String,
    },

    /// No format is registered for the file extension.
    #[error("unsupported config format: {}", path.display())]
    #[diagnostic(
        code(confidante::unsupported_format),
        help("supported extensions are .json, .toml, .yml and .yaml")
    )]
    UnsupportedFormat {
        /// File whose extension was not recognized.
        path: PathBuf,
    },

    /// The tree could not be serialized or written back.
    #[error("failed to persist {}: {message}", path.display())]
    #[diagnostic(code(confidante::persist))]
    Persist {
        /// File that was being written.
        path: PathBuf,
        /// Serializer or filesystem error.
        message: String,
    },

    /// Key material was supplied but could not be turned into a backend
    /// (bad key file, wrong passphrase, non-RSA key, malformed symmetric key).
    #[error("failed to load key: {0}")]
    #[diagnostic(code(confidante::key_load))]
    KeyLoad(String),

    /// Unlock was called with nothing resolvable.
    #[error("no key material available to unlock the configuration")]
    #[diagnostic(
        code(confidante::no_key_material),
        help("supply a symmetric key or a private key file, set CONFIDANTE_KEY, or enable prompting")
    )]
    NoKeyMaterial,

    /// Ciphertext failed format or integrity checks.
    #[error("decryption failed: {0}")]
    #[diagnostic(
        code(confidante::decryption),
        help("the key does not match the one used to encrypt this value, or the ciphertext is corrupted")
    )]
    Decryption(String),

    /// Encryption could not be performed (plaintext too long for the RSA modulus, RNG failure).
    #[error("encryption failed: {0}")]
    #[diagnostic(code(confidante::encryption))]
    Encryption(String),

    /// A mutation that needs a backend was attempted before unlock.
    #[error("configuration is not unlocked")]
    #[diagnostic(
        code(confidante::not_unlocked),
        help("unlock the configuration before encrypting values")
    )]
    NotUnlocked,

    /// The target key path is malformed (empty, or has an empty component).
    #[error("invalid key path: {0}")]
    #[diagnostic(code(confidante::invalid_path))]
    InvalidPath(String),

    /// The key path runs through a value that is not a mapping.
    #[error("key path `{path}` runs through non-mapping value at `{at}`")]
    #[diagnostic(code(confidante::path_conflict))]
    PathConflict {
        /// The full dotted key path that was requested.
        path: String,
        /// Prefix of `path` holding the non-mapping value (`<root>` for the root).
        at: String,
    },

    /// A view lookup named a key that does not exist.
    #[error("no such configuration key: {0}")]
    #[diagnostic(code(confidante::missing_key))]
    MissingKey(String),
}
