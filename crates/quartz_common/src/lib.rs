//! Shared foundational types for the Quartz clock-subsystem simulator.
//!
//! This crate provides the [`Frequency`] value type used throughout the
//! clock tree: exact integer Hertz with unit-aware parsing and display,
//! and overflow-safe multiplier/divisor scaling.

#![warn(missing_docs)]

pub mod frequency;

pub use frequency::{Frequency, ParseFrequencyError};
