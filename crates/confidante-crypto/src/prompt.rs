// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive key entry via TTY prompt.

use std::io::IsTerminal;

use confidante_core::{ConfidanteError, KeyPrompt};
use secrecy::SecretString;

/// The environment variable consulted for a symmetric key when none is
/// supplied explicitly.
pub const KEY_ENV_VAR: &str = "CONFIDANTE_KEY";

/// Reads a secret from the controlling terminal without echo.
///
/// Returns `Ok(None)` when stdin is not a terminal, so headless runs fall
/// through to [`ConfidanteError::NoKeyMaterial`] instead of blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct TtyPrompt;

impl KeyPrompt for TtyPrompt {
    fn prompt_secret(&self, message: &str) -> Result<Option<SecretString>, ConfidanteError> {
        if !std::io::stdin().is_terminal() {
            return Ok(None);
        }
        let answer = rpassword::prompt_password(message)
            .map_err(|e| ConfidanteError::KeyLoad(format!("failed to read key: {e}")))?;
        Ok(Some(SecretString::from(answer)))
    }
}
