// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Confidante integration tests.
//!
//! # Components
//!
//! - [`fixtures`] - PEM keys and ciphertexts written by earlier
//!   releases, used to pin wire compatibility
//! - [`ScriptedPrompt`] - a [`KeyPrompt`](confidante_core::KeyPrompt) that
//!   answers from a queue and records what it was asked
//! - [`MockBackend`] - a reversible, call-counting
//!   [`CryptoBackend`](confidante_core::CryptoBackend) for tree tests
//! - [`strategy`] - proptest strategies for arbitrary config trees
//! - [`write_file`] - drop a file into a temp directory

pub mod fixtures;
pub mod mock_backend;
pub mod prompt;
pub mod strategy;

pub use mock_backend::MockBackend;
pub use prompt::ScriptedPrompt;

use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `name` inside `dir` and return the full path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}
