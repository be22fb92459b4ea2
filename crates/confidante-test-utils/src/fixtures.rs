// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key material and ciphertexts shared by the test suites.
//!
//! The tokens below were written by earlier releases
//! (Fernet and RSA-OAEP/SHA-256) and must keep decrypting.

/// 2048-bit RSA key, PKCS#8 PEM.
pub const RSA_PKCS8_PEM: &str = include_str!("../fixtures/rsa_pkcs8.pem");

/// Same key as [`RSA_PKCS8_PEM`], PKCS#1 (`RSA PRIVATE KEY`) PEM.
pub const RSA_PKCS1_PEM: &str = include_str!("../fixtures/rsa_pkcs1.pem");

/// Same key as [`RSA_PKCS8_PEM`], PBES2-encrypted with [`RSA_PASSPHRASE`].
pub const RSA_PKCS8_ENCRYPTED_PEM: &str = include_str!("../fixtures/rsa_pkcs8_encrypted.pem");

/// Passphrase protecting [`RSA_PKCS8_ENCRYPTED_PEM`].
pub const RSA_PASSPHRASE: &str = "hunter2";

/// An unrelated 2048-bit RSA key.
pub const RSA_OTHER_PEM: &str = include_str!("../fixtures/rsa_other.pem");

/// A P-256 EC key in PKCS#8 PEM; not usable as an asymmetric backend.
pub const EC_P256_PEM: &str = include_str!("../fixtures/ec_p256.pem");

/// Short symmetric key that goes through the pad-to-32-bytes derivation.
pub const DERIVED_KEY: &str = "mysecretkey";

/// `"supersecret"` encrypted under [`DERIVED_KEY`].
pub const DERIVED_TOKEN: &str = "ENC::gAAAAABq1mgFkSVI7X7RnH2soZLQK8HgYKium98wBCory2WFkmLqlRqhouDrHScCCp8Nq8nA_qmL4Bv91y0KqxlH6AXEuH3R3g==";

/// A canonical 44-character base64url symmetric key, used literally.
pub const FULL_KEY: &str = "q9x2VdO3wTt8nHc1l4JkPZ0yA7sEuRfGmB6iW5XvLNo=";

/// `"héllo wörld"` encrypted under [`FULL_KEY`].
pub const FULL_TOKEN: &str = "ENC::gAAAAABq1mgFYEfsPaXbzn9vAGKqNYa9iZA23qQglX8AU9P2iWkbhxp35bQlBSbFOBGYan4-SKGLfak71efuf50dGP_6z5pOUA==";

/// `"supersecret"` encrypted to the public half of [`RSA_PKCS8_PEM`].
pub const RSA_TOKEN: &str = "ENC::JJTASR9S3g45MI6RIuDfhGnUS29MA3nExqhWpxu6WjPMxaQf2P62ddJ-kUfpoaWdP7OEkiBxwI_o9IDHxX9VIR30UcoDI_xrMeOzAXzOmSciTpwY6WHQuZlrUwXI2Bp2pI6rJbenisC0kJduBEUtef-V5kOg5My44WFCiZam7EhpF4NTbXiCkxJx8N6v4TjDECI0ORneh00rwQJAuSU0J64UDqSkc2EjrEqu0Ok668ATuKwVpr4E3KKuxeC9r3E6swd260GhUWvB1EJdrKTTmArQKxTj-O4ugph48-Sd_4kLt7F6syvA5C6N-1MfmgHYZwK9HCQl3LWCFXahK4za-w==";

/// A JSON config written by an earlier release: two copies of
/// [`DERIVED_TOKEN`], one nested in a sequence.
pub const LEGACY_SYMMETRIC_JSON: &str = include_str!("../fixtures/legacy_symmetric.json");
