// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for [`ConfidanteError`] diagnostics.

use confidante_core::ConfidanteError;
use miette::{Diagnostic, GraphicalReportHandler};

/// Render an error as a graphical miette report.
///
/// Falls back to the plain `Display` form if the handler fails.
pub fn render_error(error: &ConfidanteError) -> String {
    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    let diagnostic: &dyn Diagnostic = error;
    if handler.render_report(&mut buf, diagnostic).is_ok() {
        buf
    } else {
        format!("Error: {error}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_includes_message_code_and_help() {
        let out = render_error(&ConfidanteError::NotUnlocked);
        assert!(out.contains("configuration is not unlocked"));
        assert!(out.contains("confidante::not_unlocked"));
        assert!(out.contains("unlock the configuration"));
    }
}
