//! Structured diagnostic messages with severity, codes, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message emitted by a simulation core.
///
/// Each diagnostic carries a severity level, a unique code, a primary
/// message, the name of the clock node it concerns (when one applies),
/// and optional explanatory notes. Simulator diagnostics are located by
/// the modeled entity rather than by a source position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The name of the clock node this diagnostic concerns, if any.
    pub clock: Option<String>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic with the given code and message.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            clock: None,
            notes: Vec::new(),
        }
    }

    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            clock: None,
            notes: Vec::new(),
        }
    }

    /// Names the clock node this diagnostic concerns.
    pub fn with_clock(mut self, clock: impl Into<String>) -> Self {
        self.clock = Some(clock.into());
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Error, 101);
        let diag = Diagnostic::error(code, "simulation state corrupt");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "simulation state corrupt");
        assert_eq!(format!("{}", diag.code), "E101");
        assert!(diag.clock.is_none());
    }

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "output frequency exceeds maximum");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "output frequency exceeds maximum");
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "output frequency exceeds maximum")
            .with_clock("PLLCLK")
            .with_note("rated maximum is 168MHz");
        assert_eq!(diag.clock.as_deref(), Some("PLLCLK"));
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Clock, 1);
        let diag = Diagnostic::warning(code, "too fast").with_clock("SYSCLK");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.message, "too fast");
        assert_eq!(back.clock.as_deref(), Some("SYSCLK"));
    }
}
