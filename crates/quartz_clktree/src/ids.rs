//! Opaque ID newtype for clock-tree nodes.

use serde::{Deserialize, Serialize};

/// Opaque, copyable handle to a node in a [`ClockTree`](crate::ClockTree).
///
/// IDs are minted by the tree's wiring API and index into its node
/// registry. They are stable for the lifetime of the tree: nodes are
/// never destroyed or reordered after creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ClockNodeId(u32);

impl ClockNodeId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
