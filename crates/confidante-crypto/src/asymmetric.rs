// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! RSA key-pair backend.
//!
//! Values are encrypted to the public key with RSA-OAEP (SHA-256 for both
//! the hash and MGF1, no label) and decrypted with the private key. Any
//! modulus size works; the largest plaintext is `modulus_bytes - 66`.

use std::fs;
use std::path::Path;

use confidante_core::{ConfidanteError, CryptoBackend, mark};
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::encoding;

/// SHA-256 output length; OAEP overhead is `2 * HASH_LEN + 2`.
const HASH_LEN: usize = 32;

/// Marks a legacy OpenSSL-encrypted PKCS#1 block.
const LEGACY_ENCRYPTED_HEADER: &str = "Proc-Type: 4,ENCRYPTED";

/// Asymmetric backend holding an RSA private key and its public key.
///
/// Debug output intentionally omits key material.
pub struct AsymmetricBackend {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl std::fmt::Debug for AsymmetricBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsymmetricBackend")
            .field("private_key", &"[REDACTED]")
            .field("modulus_bits", &(self.public_key.size() * 8))
            .finish()
    }
}

impl AsymmetricBackend {
    /// Wrap an already-parsed private key.
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let public_key = private_key.to_public_key();
        Self {
            private_key,
            public_key,
        }
    }

    /// Load a PEM private key from disk.
    pub fn from_pem_file(
        path: &Path,
        passphrase: Option<&SecretString>,
    ) -> Result<Self, ConfidanteError> {
        let pem = Zeroizing::new(fs::read_to_string(path).map_err(|e| {
            ConfidanteError::KeyLoad(format!("cannot read private key {}: {e}", path.display()))
        })?);
        let backend = Self::from_pem(&pem, passphrase)?;
        debug!(path = %path.display(), bits = backend.public_key.size() * 8, "loaded RSA private key");
        Ok(backend)
    }

    /// Parse a PEM private key.
    ///
    /// Accepts `PRIVATE KEY` (PKCS#8), `ENCRYPTED PRIVATE KEY` (PKCS#8,
    /// needs `passphrase`) and unencrypted `RSA PRIVATE KEY` (PKCS#1).
    pub fn from_pem(pem: &str, passphrase: Option<&SecretString>) -> Result<Self, ConfidanteError> {
        let label = pem_label(pem)
            .ok_or_else(|| ConfidanteError::KeyLoad("no PEM private key block found".to_string()))?;

        let private_key = match (label, passphrase) {
            ("ENCRYPTED PRIVATE KEY", Some(passphrase)) => {
                RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase.expose_secret().as_bytes())
                    .map_err(pkcs8_error)?
            }
            ("ENCRYPTED PRIVATE KEY", None) => {
                return Err(ConfidanteError::KeyLoad(
                    "private key is encrypted but no passphrase was given".to_string(),
                ));
            }
            ("RSA PRIVATE KEY", _) if pem.contains(LEGACY_ENCRYPTED_HEADER) => {
                return Err(ConfidanteError::KeyLoad(
                    "legacy encrypted PKCS#1 keys are not supported; convert to encrypted PKCS#8"
                        .to_string(),
                ));
            }
            ("PRIVATE KEY" | "RSA PRIVATE KEY", Some(_)) => {
                return Err(ConfidanteError::KeyLoad(
                    "a passphrase was given but the private key is not encrypted".to_string(),
                ));
            }
            ("PRIVATE KEY", None) => RsaPrivateKey::from_pkcs8_pem(pem).map_err(pkcs8_error)?,
            ("RSA PRIVATE KEY", None) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| {
                ConfidanteError::KeyLoad(format!("malformed RSA private key: {e}"))
            })?,
            (other, _) => {
                return Err(ConfidanteError::KeyLoad(format!(
                    "private key must be RSA, found a `{other}` block"
                )));
            }
        };

        Ok(Self::from_private_key(private_key))
    }

    /// The public half, for callers that only need to encrypt.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Largest plaintext in bytes this key can encrypt.
    pub fn max_plaintext_len(&self) -> usize {
        self.public_key.size().saturating_sub(2 * HASH_LEN + 2)
    }
}

impl CryptoBackend for AsymmetricBackend {
    fn name(&self) -> &'static str {
        "asymmetric"
    }

    fn encrypt(&self, plaintext: &str) -> Result<String, ConfidanteError> {
        let ciphertext = self
            .public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext.as_bytes())
            .map_err(|e| match e {
                rsa::Error::MessageTooLong => ConfidanteError::Encryption(format!(
                    "plaintext is {} bytes but this key encrypts at most {}",
                    plaintext.len(),
                    self.max_plaintext_len()
                )),
                other => ConfidanteError::Encryption(format!("RSA-OAEP encryption failed: {other}")),
            })?;
        Ok(mark(&encoding::encode(&ciphertext)))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, ConfidanteError> {
        let bytes = encoding::decode(ciphertext).map_err(|e| {
            ConfidanteError::Decryption(format!("ciphertext is not valid base64url: {e}"))
        })?;
        let plaintext = self
            .private_key
            .decrypt(Oaep::new::<Sha256>(), &bytes)
            .map_err(|_| {
                ConfidanteError::Decryption(
                    "RSA-OAEP decryption failed -- wrong key or corrupted data".to_string(),
                )
            })?;
        String::from_utf8(plaintext)
            .map_err(|_| ConfidanteError::Decryption("plaintext is not valid UTF-8".to_string()))
    }
}

/// Label of the first `-----BEGIN <label>-----` line.
fn pem_label(pem: &str) -> Option<&str> {
    pem.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("-----BEGIN ")?.strip_suffix("-----"))
}

fn pkcs8_error(err: rsa::pkcs8::Error) -> ConfidanteError {
    match err {
        rsa::pkcs8::Error::PublicKey(_) => {
            ConfidanteError::KeyLoad("private key must be RSA".to_string())
        }
        rsa::pkcs8::Error::EncryptedPrivateKey(_) => ConfidanteError::KeyLoad(
            "could not decrypt private key -- wrong passphrase?".to_string(),
        ),
        other => ConfidanteError::KeyLoad(format!("malformed private key: {other}")),
    }
}
