// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The secret marker protocol.
//!
//! A string scalar is ciphertext iff it starts with [`MARKER`]. The remainder
//! is the backend's base64url encoding of the ciphertext bytes. Anything else
//! is plaintext.

/// Literal prefix identifying a string scalar as ciphertext.
pub const MARKER: &str = "ENC::";

/// Returns true if `value` carries the ciphertext marker.
pub fn is_marked(value: &str) -> bool {
    value.starts_with(MARKER)
}

/// Returns the encoded ciphertext after the marker, or `None` for plaintext.
pub fn strip_marker(value: &str) -> Option<&str> {
    value.strip_prefix(MARKER)
}

/// Prepends the marker to an encoded ciphertext.
pub fn mark(encoded: &str) -> String {
    let mut out = String::with_capacity(MARKER.len() + encoded.len());
    out.push_str(MARKER);
    out.push_str(encoded);
    out
}
