// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted key prompt for deterministic unlock tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use confidante_core::{ConfidanteError, KeyPrompt};
use secrecy::SecretString;

/// A prompt that returns pre-configured answers in FIFO order.
///
/// When the queue is empty it behaves like a non-interactive terminal and
/// returns `Ok(None)`.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    /// A prompt with no answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// A prompt pre-loaded with the given answers.
    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Messages this prompt has been asked, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().expect("prompt lock poisoned").clone()
    }
}

impl KeyPrompt for ScriptedPrompt {
    fn prompt_secret(&self, message: &str) -> Result<Option<SecretString>, ConfidanteError> {
        self.asked
            .lock()
            .expect("prompt lock poisoned")
            .push(message.to_string());
        let answer = self
            .answers
            .lock()
            .expect("prompt lock poisoned")
            .pop_front();
        Ok(answer.map(SecretString::from))
    }
}
