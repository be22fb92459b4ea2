// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock crypto backend for fast, deterministic tree tests.
//!
//! `MockBackend` "encrypts" by hex-encoding the plaintext behind the marker.
//! It is reversible and cheap, and counts calls so tests can assert how
//! often the walker touched the backend.

use std::sync::atomic::{AtomicUsize, Ordering};

use confidante_core::{ConfidanteError, CryptoBackend, mark};

/// A reversible, non-cryptographic backend that counts its calls.
#[derive(Debug, Default)]
pub struct MockBackend {
    encrypts: AtomicUsize,
    decrypts: AtomicUsize,
}

impl MockBackend {
    /// Create a backend with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `encrypt` calls so far.
    pub fn encrypt_calls(&self) -> usize {
        self.encrypts.load(Ordering::SeqCst)
    }

    /// Number of `decrypt` calls so far.
    pub fn decrypt_calls(&self) -> usize {
        self.decrypts.load(Ordering::SeqCst)
    }
}

impl CryptoBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, ConfidanteError> {
        self.encrypts.fetch_add(1, Ordering::SeqCst);
        let hex: String = plaintext.bytes().map(|b| format!("{b:02x}")).collect();
        Ok(mark(&hex))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, ConfidanteError> {
        self.decrypts.fetch_add(1, Ordering::SeqCst);
        let bad = || ConfidanteError::Decryption(format!("not a mock ciphertext: {ciphertext}"));
        if ciphertext.len() % 2 != 0 || !ciphertext.is_ascii() {
            return Err(bad());
        }
        let bytes = (0..ciphertext.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&ciphertext[i..i + 2], 16).map_err(|_| bad()))
            .collect::<Result<Vec<u8>, _>>()?;
        String::from_utf8(bytes).map_err(|_| bad())
    }
}
