// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Confidante.
//!
//! Confidante keeps secrets inside ordinary JSON, TOML, and YAML config
//! files by replacing individual string values with marked ciphertext
//! (`ENC::<base64url>`). This crate holds the pieces every other crate
//! agrees on: the error taxonomy, the generic config tree, the marker
//! protocol, and the traits that crypto backends and key prompts implement.

pub mod error;
pub mod marker;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ConfidanteError;
pub use marker::{MARKER, is_marked, mark, strip_marker};
pub use traits::{CryptoBackend, KeyPrompt, NoPrompt};
pub use types::{ConfigMap, ConfigTree, EnvVars, display_path, process_env};
