//! Per-node state for clock-tree elements.

use std::fmt;

use quartz_common::Frequency;

use crate::ids::ClockNodeId;
use crate::observer::PulseSink;

/// One element of the clock-distribution tree: an oscillator, a PLL
/// stage, a prescaler, a multiplexer, or a gate.
///
/// Nodes are owned by the [`ClockTree`](crate::ClockTree) and mutated
/// only through its API, which re-establishes the output invariant
/// `output_freq == if enabled { input_freq * multiplier / divisor } else { 0 }`
/// after every change. External code reads node state through the
/// accessors here; all wiring and scalar mutation goes through the tree.
pub struct ClockNode {
    pub(crate) name: String,
    pub(crate) input_freq: Frequency,
    pub(crate) output_freq: Frequency,
    pub(crate) multiplier: u32,
    pub(crate) divisor: u32,
    pub(crate) enabled: bool,
    pub(crate) max_output_freq: Option<Frequency>,
    pub(crate) candidate_inputs: Vec<ClockNodeId>,
    pub(crate) selected_input: Option<usize>,
    pub(crate) fan_out: Vec<ClockNodeId>,
    pub(crate) observers: Vec<Box<dyn PulseSink>>,
}

impl ClockNode {
    pub(crate) fn new(name: impl Into<String>, multiplier: u32, divisor: u32, enabled: bool) -> Self {
        Self {
            name: name.into(),
            input_freq: Frequency::ZERO,
            output_freq: Frequency::ZERO,
            multiplier,
            divisor,
            enabled,
            max_output_freq: None,
            candidate_inputs: Vec::new(),
            selected_input: None,
            fan_out: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Returns the node's name, used for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the frequency currently supplied by the selected input.
    pub fn input_freq(&self) -> Frequency {
        self.input_freq
    }

    /// Returns the last committed output frequency.
    pub fn output_freq(&self) -> Frequency {
        self.output_freq
    }

    /// Returns the frequency multiplier.
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Returns the frequency divisor.
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Returns whether the node's gate is open.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the advisory output-frequency ceiling, if one is set.
    pub fn max_output_freq(&self) -> Option<Frequency> {
        self.max_output_freq
    }

    /// Returns the nodes that could supply this node's input.
    pub fn candidate_inputs(&self) -> &[ClockNodeId] {
        &self.candidate_inputs
    }

    /// Returns the index of the currently selected candidate input.
    pub fn selected_input(&self) -> Option<usize> {
        self.selected_input
    }

    /// Returns the node currently selected as this node's input source.
    pub fn selected_source(&self) -> Option<ClockNodeId> {
        self.selected_input.map(|index| self.candidate_inputs[index])
    }

    /// Returns the nodes that declared this node as a candidate input.
    pub fn fan_out(&self) -> &[ClockNodeId] {
        &self.fan_out
    }

    /// Returns the number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for ClockNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockNode")
            .field("name", &self.name)
            .field("input_freq", &self.input_freq)
            .field("output_freq", &self.output_freq)
            .field("multiplier", &self.multiplier)
            .field("divisor", &self.divisor)
            .field("enabled", &self.enabled)
            .field("max_output_freq", &self.max_output_freq)
            .field("candidate_inputs", &self.candidate_inputs)
            .field("selected_input", &self.selected_input)
            .field("fan_out", &self.fan_out)
            .field("observers", &self.observers.len())
            .finish()
    }
}
