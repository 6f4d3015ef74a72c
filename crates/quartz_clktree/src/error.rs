//! Structural error types for clock-tree wiring and mutation.
//!
//! These errors indicate a malformed topology description coming from
//! the board-wiring layer: capacity overflows, out-of-range selections,
//! zero scale factors. They abort the offending operation before any
//! state is committed; there is no recovery path, because the graph
//! cannot be simulated safely once its description is wrong.

/// Errors raised by clock-tree construction and mutation.
#[derive(Debug, thiserror::Error)]
pub enum ClockTreeError {
    /// A derived clock declared more candidate inputs than the tree's
    /// fan-in capacity allows.
    #[error("clock '{clock}': {count} candidate inputs exceed the fan-in capacity of {max}")]
    FanInCapacityExceeded {
        /// The clock whose candidate list is too long.
        clock: String,
        /// The number of candidate inputs declared.
        count: usize,
        /// The configured fan-in capacity.
        max: usize,
    },

    /// Wiring a derived clock would push a source's fan-out list past
    /// the tree's fan-out capacity.
    #[error("clock '{clock}': wiring '{child}' exceeds the fan-out capacity of {max}")]
    FanOutCapacityExceeded {
        /// The source clock whose fan-out list is full.
        clock: String,
        /// The derived clock that could not be wired.
        child: String,
        /// The configured fan-out capacity.
        max: usize,
    },

    /// A clock already has the maximum number of registered observers.
    #[error("clock '{clock}': observer capacity of {max} exceeded")]
    ObserverCapacityExceeded {
        /// The clock whose observer list is full.
        clock: String,
        /// The configured observer capacity.
        max: usize,
    },

    /// An input selection referenced a position outside the clock's
    /// candidate-input list.
    #[error("clock '{clock}': selected input {index} out of range ({count} candidates)")]
    SelectionOutOfRange {
        /// The clock being selected on.
        clock: String,
        /// The out-of-range candidate index.
        index: usize,
        /// The number of candidate inputs the clock has.
        count: usize,
    },

    /// A multiplier or divisor of zero was supplied.
    #[error("clock '{clock}': scale factors must be non-zero (multiplier {multiplier}, divisor {divisor})")]
    InvalidScale {
        /// The clock whose scale was being set.
        clock: String,
        /// The rejected multiplier.
        multiplier: u32,
        /// The rejected divisor.
        divisor: u32,
    },
}
