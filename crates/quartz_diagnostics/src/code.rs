//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
///
/// Each category maps to a single-character prefix used in diagnostic
/// code display (e.g., `E101` for an error, `C001` for a clock-subsystem
/// advisory).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Error diagnostics, prefixed with `E`.
    Error,
    /// General warning diagnostics, prefixed with `W`.
    Warning,
    /// Clock-subsystem diagnostics, prefixed with `C`.
    Clock,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub const fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Clock => 'C',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a
/// numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit
/// number, e.g., `E101`, `W203`, `C001`. `new` is `const` so cores can
/// define their codes as constants.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
