// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared-key backend producing Fernet tokens.
//!
//! Key policy: a 44-character string is taken as the canonical base64url
//! encoding of a 32-byte key and used literally. Any other string is turned
//! into a key by right-padding its UTF-8 bytes with ASCII `'0'` (or
//! truncating) to exactly 32 bytes.
//!
//! That fallback is **not** a key derivation function. It exists so files
//! written by earlier releases keep decrypting, and it is reported through
//! [`SymmetricBackend::uses_derived_key`] and a warning. Changing it would
//! orphan every value already encrypted under a short key.

use confidante_core::{ConfidanteError, CryptoBackend, mark};
use rand::RngCore;
use rand::rngs::OsRng;
use secrecy::SecretString;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::encoding;
use crate::fernet::{self, KEY_LEN};

/// Length of a base64url-encoded 32-byte key (with padding).
pub const ENCODED_KEY_LEN: usize = 44;

const PAD_BYTE: u8 = b'0';

/// Symmetric backend holding a single 32-byte Fernet key.
///
/// Debug output intentionally omits the key.
pub struct SymmetricBackend {
    key: Zeroizing<[u8; KEY_LEN]>,
    derived: bool,
}

impl std::fmt::Debug for SymmetricBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricBackend")
            .field("key", &"[REDACTED]")
            .field("derived", &self.derived)
            .finish()
    }
}

impl SymmetricBackend {
    /// Build a backend from a user-supplied key string.
    ///
    /// Fails with [`ConfidanteError::KeyLoad`] only when a 44-character key
    /// is not valid base64url of exactly 32 bytes.
    pub fn new(key: &str) -> Result<Self, ConfidanteError> {
        if key.chars().count() == ENCODED_KEY_LEN {
            let decoded = Zeroizing::new(encoding::decode(key).map_err(|e| {
                ConfidanteError::KeyLoad(format!("symmetric key is not valid base64url: {e}"))
            })?);
            let bytes: [u8; KEY_LEN] = decoded.as_slice().try_into().map_err(|_| {
                ConfidanteError::KeyLoad(format!(
                    "symmetric key must decode to {KEY_LEN} bytes, got {}",
                    decoded.len()
                ))
            })?;
            debug!("using literal symmetric key");
            return Ok(Self {
                key: Zeroizing::new(bytes),
                derived: false,
            });
        }

        warn!(
            "symmetric key is not a {ENCODED_KEY_LEN}-character base64url key; \
             padding it to {KEY_LEN} bytes, which is not a key derivation function"
        );
        Ok(Self {
            key: derive_padded_key(key.as_bytes()),
            derived: true,
        })
    }

    /// True when the key went through the pad/truncate fallback instead of
    /// being used literally.
    pub fn uses_derived_key(&self) -> bool {
        self.derived
    }
}

impl CryptoBackend for SymmetricBackend {
    fn name(&self) -> &'static str {
        "symmetric"
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, ConfidanteError> {
        let token = fernet::seal(&self.key, plaintext.as_bytes())?;
        Ok(mark(&encoding::encode(&token)))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, ConfidanteError> {
        let token = encoding::decode(ciphertext).map_err(|e| {
            ConfidanteError::Decryption(format!("ciphertext is not valid base64url: {e}"))
        })?;
        let plaintext = fernet::open(&self.key, &token)?;
        String::from_utf8(plaintext)
            .map_err(|_| ConfidanteError::Decryption("plaintext is not valid UTF-8".to_string()))
    }
}

/// Pad with ASCII `'0'` or truncate to exactly [`KEY_LEN`] bytes.
fn derive_padded_key(raw: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([PAD_BYTE; KEY_LEN]);
    let len = raw.len().min(KEY_LEN);
    key[..len].copy_from_slice(&raw[..len]);
    key
}

/// Generate a random symmetric key, base64url-encoded to 44 characters.
pub fn generate_symmetric_key() -> Result<SecretString, ConfidanteError> {
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    OsRng
        .try_fill_bytes(bytes.as_mut())
        .map_err(|e| ConfidanteError::KeyLoad(format!("failed to generate random key: {e}")))?;
    Ok(SecretString::from(encoding::encode(bytes.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use confidante_core::strip_marker;
    use confidante_test_utils::fixtures;
    use proptest::prelude::*;
    use secrecy::ExposeSecret;
    use tracing_test::traced_test;

    #[test]
    fn encrypt_produces_marked_fernet_token() {
        let backend = SymmetricBackend::new("mysecretkey").unwrap();
        let enc = backend.encrypt("hello").unwrap();
        assert!(enc.starts_with("ENC::gAAAAA"));
        assert_eq!(backend.decrypt(strip_marker(&enc).unwrap()).unwrap(), "hello");
    }

    #[test]
    fn short_key_is_padded_with_ascii_zero() {
        let key = derive_padded_key(b"mysecretkey");
        assert_eq!(&key[..], b"mysecretkey000000000000000000000");
        assert!(SymmetricBackend::new("mysecretkey").unwrap().uses_derived_key());
    }

    #[test]
    fn long_key_is_truncated() {
        let raw = "a".repeat(50);
        let key = derive_padded_key(raw.as_bytes());
        assert_eq!(&key[..], &raw.as_bytes()[..KEY_LEN]);
    }

    #[test]
    fn canonical_key_is_used_literally() {
        let backend = SymmetricBackend::new(fixtures::FULL_KEY).unwrap();
        assert!(!backend.uses_derived_key());
        let expected = encoding::decode(fixtures::FULL_KEY).unwrap();
        assert_eq!(&backend.key[..], expected.as_slice());
    }

    #[test]
    fn malformed_canonical_length_key_is_rejected() {
        let bogus = "!".repeat(ENCODED_KEY_LEN);
        let err = SymmetricBackend::new(&bogus).unwrap_err();
        assert!(matches!(err, ConfidanteError::KeyLoad(_)));
    }

    #[test]
    fn decrypts_legacy_tokens() {
        let derived = SymmetricBackend::new(fixtures::DERIVED_KEY).unwrap();
        let token = strip_marker(fixtures::DERIVED_TOKEN).unwrap();
        assert_eq!(derived.decrypt(token).unwrap(), "supersecret");

        let full = SymmetricBackend::new(fixtures::FULL_KEY).unwrap();
        let token = strip_marker(fixtures::FULL_TOKEN).unwrap();
        assert_eq!(full.decrypt(token).unwrap(), "héllo wörld");
    }

    #[test]
    fn wrong_key_fails_with_decryption_error() {
        let backend = SymmetricBackend::new("K2").unwrap();
        let token = strip_marker(fixtures::DERIVED_TOKEN).unwrap();
        let err = backend.decrypt(token).unwrap_err();
        assert!(matches!(err, ConfidanteError::Decryption(_)));
    }

    #[test]
    fn garbage_ciphertext_fails_with_decryption_error() {
        let backend = SymmetricBackend::new("k").unwrap();
        assert!(matches!(
            backend.decrypt("not base64 at all!").unwrap_err(),
            ConfidanteError::Decryption(_)
        ));
        assert!(matches!(
            backend.decrypt("AAAA").unwrap_err(),
            ConfidanteError::Decryption(_)
        ));
    }

    #[test]
    fn generated_keys_are_canonical_and_distinct() {
        let k1 = generate_symmetric_key().unwrap();
        let k2 = generate_symmetric_key().unwrap();
        assert_eq!(k1.expose_secret().len(), ENCODED_KEY_LEN);
        assert_ne!(k1.expose_secret(), k2.expose_secret());
        assert!(!SymmetricBackend::new(k1.expose_secret()).unwrap().uses_derived_key());
    }

    #[test]
    #[traced_test]
    fn derived_key_is_reported_but_never_logged() {
        SymmetricBackend::new("mysecretkey").unwrap();
        assert!(logs_contain("not a key derivation function"));
        assert!(!logs_contain("mysecretkey"));
    }

    #[test]
    #[traced_test]
    fn canonical_key_does_not_warn() {
        SymmetricBackend::new(fixtures::FULL_KEY).unwrap();
        assert!(!logs_contain("not a key derivation function"));
    }

    #[test]
    fn debug_output_redacts_key() {
        let backend = SymmetricBackend::new("mysecretkey").unwrap();
        let out = format!("{backend:?}");
        assert!(out.contains("REDACTED"));
        assert!(!out.contains("mysecretkey"));
    }

    proptest! {
        #[test]
        fn roundtrip_any_plaintext(key in ".{0,60}", plaintext in ".*") {
            let backend = SymmetricBackend::new(&key);
            prop_assume!(backend.is_ok());
            let backend = backend.unwrap();
            let marked = backend.encrypt(&plaintext).unwrap();
            let decrypted = backend.decrypt(strip_marker(&marked).unwrap()).unwrap();
            prop_assert_eq!(decrypted, plaintext);
        }
    }
}
