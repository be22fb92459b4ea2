// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value-level encryption backends for Confidante.
//!
//! Two backends implement [`CryptoBackend`](confidante_core::CryptoBackend):
//!
//! - [`SymmetricBackend`]: a single shared key, Fernet tokens
//!   (AES-128-CBC + HMAC-SHA256 with a timestamp).
//! - [`AsymmetricBackend`]: an RSA private key; encrypts with the derived
//!   public key using OAEP with SHA-256 for both hash and MGF1.
//!
//! Both produce `ENC::` + base64url(ciphertext) and are wire-compatible with
//! files written by earlier releases. [`resolve_backend`] picks a
//! backend from caller-supplied [`KeyMaterial`].

pub mod asymmetric;
pub mod encoding;
pub mod fernet;
pub mod prompt;
pub mod resolve;
pub mod symmetric;

pub use asymmetric::AsymmetricBackend;
pub use prompt::{KEY_ENV_VAR, TtyPrompt};
pub use resolve::{KeyMaterial, resolve_backend};
pub use symmetric::{SymmetricBackend, generate_symmetric_key};
