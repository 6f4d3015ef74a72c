//! Diagnostic rendering backends for human-readable and machine-readable output.

use crate::diagnostic::Diagnostic;

/// Trait for rendering diagnostics into formatted output strings.
///
/// Implementations format diagnostics for different output targets:
/// terminal (human-readable) and JSON (machine-readable).
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// warning[C001]: output frequency 12MHz exceeds maximum 10MHz
///   --> clock 'PLLCLK'
///    = note: the computed value is kept; real hardware would run out of spec
/// ```
pub struct TerminalRenderer;

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        // Header line: severity[CODE]: message
        out.push_str(&format!(
            "{}[{}]: {}\n",
            diag.severity, diag.code, diag.message
        ));

        // Locus line: the clock node the diagnostic concerns
        if let Some(clock) = &diag.clock {
            out.push_str(&format!("  --> clock '{clock}'\n"));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }

        out
    }
}

/// Renders diagnostics as JSON objects, one per diagnostic.
pub struct JsonRenderer {
    /// Whether to pretty-print with indentation.
    pub pretty: bool,
}

impl JsonRenderer {
    /// Creates a new JSON renderer.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl DiagnosticRenderer for JsonRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        if self.pretty {
            serde_json::to_string_pretty(diag).unwrap()
        } else {
            serde_json::to_string(diag).unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};

    #[test]
    fn render_warning_with_clock() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "output frequency 12MHz exceeds maximum 10MHz")
            .with_clock("PLLCLK");

        let output = TerminalRenderer::new().render(&diag);
        assert!(output.contains("warning[C001]: output frequency 12MHz exceeds maximum 10MHz"));
        assert!(output.contains("--> clock 'PLLCLK'"));
    }

    #[test]
    fn render_without_clock_omits_locus() {
        let code = DiagnosticCode::new(Category::Error, 999);
        let diag = Diagnostic::error(code, "general error");

        let output = TerminalRenderer::new().render(&diag);
        assert!(output.contains("error[E999]: general error"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn render_notes() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "too fast")
            .with_note("the computed value is kept");

        let output = TerminalRenderer::new().render(&diag);
        assert!(output.contains("= note: the computed value is kept"));
    }

    #[test]
    fn render_json() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "too fast").with_clock("SYSCLK");

        let output = JsonRenderer::new(false).render(&diag);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["message"], "too fast");
        assert_eq!(value["clock"], "SYSCLK");
    }

    #[test]
    fn render_json_pretty() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "too fast");

        let output = JsonRenderer::new(true).render(&diag);
        assert!(output.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&output).is_ok());
    }
}
