// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config documents with selectively encrypted values.
//!
//! A [`ConfigDocument`] is loaded from JSON, TOML, or YAML, optionally merged
//! with `CONFIDANTE__section__key` environment overrides, and unlocked with
//! key material to decrypt every `ENC::` value in one pass. Individual values
//! can then be encrypted in place and the document written back in its
//! native format.
//!
//! # Usage
//!
//! ```no_run
//! use confidante_config::ConfigDocument;
//! use confidante_crypto::KeyMaterial;
//!
//! let mut doc = ConfigDocument::load("config.json").expect("load");
//! doc.unlock(KeyMaterial::symmetric("mysecretkey")).expect("unlock");
//! let api_key = doc.config().path("credentials.api_key").expect("key");
//! println!("{:?}", api_key.as_str());
//! ```

pub mod diagnostic;
pub mod document;
pub mod format;
pub mod overlay;
pub mod tidy;
pub mod view;
pub mod walker;

pub use diagnostic::render_error;
pub use document::ConfigDocument;
pub use format::{ConfigFormat, JsonFormat, TomlFormat, YamlFormat, format_for_path};
pub use overlay::{DEFAULT_PREFIX, merge};
pub use tidy::normalize;
pub use view::ConfigView;
pub use walker::{decrypt_tree, encrypt_at, has_marked_value, set_at};
