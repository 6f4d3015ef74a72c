//! Clock-distribution tree model for microcontroller simulation.
//!
//! This crate reproduces the frequency-generation behavior of an MCU
//! clock subsystem: oscillators, multiplexed sources, multiplier/divider
//! stages, and gates. Board-wiring code builds the topology once through
//! the wiring API; register-decode models mutate enables, scale factors,
//! and mux selections at runtime; the engine recomputes every affected
//! output frequency synchronously, so peripheral timing models always
//! query a consistent value.
//!
//! # Usage
//!
//! ```
//! use quartz_clktree::{ClockTree, DerivedClock};
//! use quartz_common::Frequency;
//!
//! let mut tree = ClockTree::new();
//! let hse = tree.create_source("HSE", Frequency::from_hz(8_000_000), true);
//! let pll = tree
//!     .create_derived(DerivedClock {
//!         name: "PLLCLK",
//!         multiplier: 2,
//!         divisor: 1,
//!         enabled: true,
//!         max_output_freq: None,
//!         selected_input: Some(0),
//!         candidate_inputs: &[hse],
//!     })
//!     .unwrap();
//! assert_eq!(tree.output_freq(pll).hz(), 16_000_000);
//! ```
//!
//! # Architecture
//!
//! - [`tree`] — the node registry, wiring/mutation/query APIs, and the
//!   change-driven recalculation engine
//! - [`node`] — per-node state and read accessors
//! - [`ids`] — opaque node handles
//! - [`observer`] — the edge-triggered [`PulseSink`] notification trait
//! - [`error`] — structural wiring/mutation errors

#![warn(missing_docs)]

pub mod error;
pub mod ids;
pub mod node;
pub mod observer;
pub mod tree;

pub use error::ClockTreeError;
pub use ids::ClockNodeId;
pub use node::ClockNode;
pub use observer::{pulse_fn, PulseSink};
pub use tree::{ClockTree, ClockTreeConfig, DerivedClock, OVER_FREQUENCY};
