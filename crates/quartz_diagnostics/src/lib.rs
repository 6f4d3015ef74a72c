//! Structured diagnostics for the Quartz clock-subsystem simulator.
//!
//! Simulation cores report advisory and error conditions as structured
//! [`Diagnostic`] values rather than printing to a global stream. The
//! thread-safe [`DiagnosticSink`] accumulates them for the embedding
//! system to inspect, and [`DiagnosticRenderer`] implementations format
//! them for terminal or JSON output.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
