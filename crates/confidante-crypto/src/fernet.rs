// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level Fernet seal/open operations.
//!
//! Token layout: `0x80 | timestamp (u64 BE) | IV (16) | AES-128-CBC ciphertext | HMAC-SHA256 (32)`.
//! The HMAC covers every byte before it. The first half of the 32-byte key
//! signs, the second half encrypts. Every call to [`seal`] draws a fresh IV
//! from the OS CSPRNG. Timestamps are written but no TTL is enforced on open.

use std::time::{SystemTime, UNIX_EPOCH};

use aes::Aes128;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use confidante_core::ConfidanteError;
use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Length of a raw Fernet key.
pub const KEY_LEN: usize = 32;

const VERSION: u8 = 0x80;
const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const TAG_LEN: usize = 32;
const HEADER_LEN: usize = 1 + TIMESTAMP_LEN + IV_LEN;

/// Encrypt `plaintext` into a binary Fernet token stamped with the current time.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, ConfidanteError> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| ConfidanteError::Encryption(format!("failed to generate IV: {e}")))?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    seal_with(key, plaintext, timestamp, &iv)
}

/// Encrypt with an explicit timestamp and IV.
pub fn seal_with(
    key: &[u8; KEY_LEN],
    plaintext: &[u8],
    timestamp: u64,
    iv: &[u8; IV_LEN],
) -> Result<Vec<u8>, ConfidanteError> {
    let (signing_key, encryption_key) = key.split_at(KEY_LEN / 2);

    let ciphertext = Aes128CbcEnc::new_from_slices(encryption_key, iv)
        .map_err(|_| ConfidanteError::Encryption("failed to create AES-128-CBC key".to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut token = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
    token.push(VERSION);
    token.extend_from_slice(&timestamp.to_be_bytes());
    token.extend_from_slice(iv);
    token.extend_from_slice(&ciphertext);

    let mut mac = HmacSha256::new_from_slice(signing_key)
        .map_err(|e| ConfidanteError::Encryption(format!("hmac failed: {e}")))?;
    mac.update(&token);
    token.extend_from_slice(&mac.finalize().into_bytes());

    Ok(token)
}

/// Verify and decrypt a binary Fernet token.
///
/// The signature is checked before any decryption, so a wrong key or a
/// tampered token fails without touching the cipher.
pub fn open(key: &[u8; KEY_LEN], token: &[u8]) -> Result<Vec<u8>, ConfidanteError> {
    if token.len() < HEADER_LEN + BLOCK_LEN + TAG_LEN {
        return Err(ConfidanteError::Decryption("token is too short".to_string()));
    }
    if token[0] != VERSION {
        return Err(ConfidanteError::Decryption(format!(
            "unsupported token version 0x{:02x}",
            token[0]
        )));
    }

    let (signing_key, encryption_key) = key.split_at(KEY_LEN / 2);
    let (signed, tag) = token.split_at(token.len() - TAG_LEN);

    let mut mac = HmacSha256::new_from_slice(signing_key)
        .map_err(|e| ConfidanteError::Decryption(format!("hmac failed: {e}")))?;
    mac.update(signed);
    mac.verify_slice(tag).map_err(|_| {
        ConfidanteError::Decryption("token signature mismatch -- wrong key or corrupted data".to_string())
    })?;

    let iv = &signed[1 + TIMESTAMP_LEN..HEADER_LEN];
    let ciphertext = &signed[HEADER_LEN..];
    if ciphertext.len() % BLOCK_LEN != 0 {
        return Err(ConfidanteError::Decryption(
            "ciphertext is not a whole number of blocks".to_string(),
        ));
    }

    Aes128CbcDec::new_from_slices(encryption_key, iv)
        .map_err(|_| ConfidanteError::Decryption("failed to create AES-128-CBC key".to_string()))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| ConfidanteError::Decryption("invalid padding".to_string()))
}

/// Read the creation timestamp (seconds since the epoch) of a token
/// without verifying it.
pub fn timestamp(token: &[u8]) -> Option<u64> {
    let bytes: [u8; TIMESTAMP_LEN] = token.get(1..1 + TIMESTAMP_LEN)?.try_into().ok()?;
    Some(u64::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding;

    fn reference_key() -> [u8; KEY_LEN] {
        encoding::decode("cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=")
            .unwrap()
            .try_into()
            .unwrap()
    }

    #[test]
    fn matches_reference_vector() {
        // Fernet reference vector (generate.json).
        let iv: [u8; IV_LEN] = core::array::from_fn(|i| i as u8);
        let token = seal_with(&reference_key(), b"hello", 499_162_800, &iv).unwrap();
        assert_eq!(
            encoding::encode(&token),
            "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA=="
        );
    }

    #[test]
    fn opens_reference_vector() {
        let token = encoding::decode(
            "gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==",
        )
        .unwrap();
        assert_eq!(open(&reference_key(), &token).unwrap(), b"hello");
        assert_eq!(timestamp(&token), Some(499_162_800));
    }

    #[test]
    fn seal_open_roundtrip() {
        let key = [9u8; KEY_LEN];
        let token = seal(&key, b"secret api key value").unwrap();
        assert_eq!(open(&key, &token).unwrap(), b"secret api key value");
    }

    #[test]
    fn seal_uses_fresh_iv() {
        let key = [3u8; KEY_LEN];
        let t1 = seal(&key, b"same input twice").unwrap();
        let t2 = seal(&key, b"same input twice").unwrap();
        assert_ne!(t1[HEADER_LEN - IV_LEN..HEADER_LEN], t2[HEADER_LEN - IV_LEN..HEADER_LEN]);
        assert_ne!(t1, t2);
    }

    #[test]
    fn empty_plaintext_is_one_padded_block() {
        let key = [1u8; KEY_LEN];
        let token = seal(&key, b"").unwrap();
        assert_eq!(token.len(), HEADER_LEN + BLOCK_LEN + TAG_LEN);
        assert_eq!(open(&key, &token).unwrap(), b"");
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let token = seal(&[1u8; KEY_LEN], b"secret data").unwrap();
        let err = open(&[2u8; KEY_LEN], &token).unwrap_err();
        assert!(matches!(err, ConfidanteError::Decryption(_)));
    }

    #[test]
    fn tampered_token_fails() {
        let key = [5u8; KEY_LEN];
        let mut token = seal(&key, b"do not tamper").unwrap();
        token[HEADER_LEN] ^= 0x01;
        assert!(open(&key, &token).is_err());
    }

    #[test]
    fn truncated_and_misversioned_tokens_fail() {
        let key = [5u8; KEY_LEN];
        let token = seal(&key, b"x").unwrap();
        assert!(open(&key, &token[..40]).is_err());

        let mut bad_version = token.clone();
        bad_version[0] = 0x81;
        let err = open(&key, &bad_version).unwrap_err();
        assert!(err.to_string().contains("version"));
    }
}
