//! The clock-tree registry: wiring, mutation, recalculation, and queries.
//!
//! [`ClockTree`] owns every [`ClockNode`] in a central registry addressed
//! by [`ClockNodeId`] handles. Board-wiring code builds the graph once,
//! leaf-first, through the wiring API; at runtime, register-decode models
//! call the mutation API, and the engine synchronously recomputes and
//! propagates output frequencies before the mutating call returns, so
//! queries never observe a half-settled graph.

use std::sync::Arc;

use quartz_common::Frequency;
use quartz_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

use crate::error::ClockTreeError;
use crate::ids::ClockNodeId;
use crate::node::ClockNode;
use crate::observer::PulseSink;

/// Diagnostic code emitted when a clock's output frequency exceeds its
/// configured maximum. Advisory: the computed value stands.
pub const OVER_FREQUENCY: DiagnosticCode = DiagnosticCode::new(Category::Clock, 1);

/// Wiring-time capacity limits for a clock tree.
///
/// The limits bound the candidate-input, fan-out, and observer lists of
/// every node. They are fixed when the tree is created; exceeding one
/// during wiring is a structural error, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClockTreeConfig {
    /// Maximum number of candidate inputs a node may declare.
    pub max_fan_in: usize,
    /// Maximum number of fan-out edges a node may accumulate.
    pub max_fan_out: usize,
    /// Maximum number of observers registrable on one node.
    pub max_observers: usize,
}

impl Default for ClockTreeConfig {
    fn default() -> Self {
        Self {
            max_fan_in: 8,
            max_fan_out: 24,
            max_observers: 16,
        }
    }
}

/// Descriptor for a derived clock node, passed to
/// [`ClockTree::create_derived`].
///
/// `candidate_inputs` is the explicit, ordered list of nodes that could
/// supply this node's input; `selected_input` indexes into it (`None`
/// means no input, yielding a 0 Hz input frequency).
#[derive(Debug, Clone)]
pub struct DerivedClock<'a> {
    /// Name of the new node, used for diagnostics.
    pub name: &'a str,
    /// Frequency multiplier (must be non-zero).
    pub multiplier: u32,
    /// Frequency divisor (must be non-zero).
    pub divisor: u32,
    /// Whether the node's gate starts open.
    pub enabled: bool,
    /// Advisory output-frequency ceiling, if any.
    pub max_output_freq: Option<Frequency>,
    /// Initial selection into `candidate_inputs`.
    pub selected_input: Option<usize>,
    /// Nodes that may supply this node's input, in selection order.
    pub candidate_inputs: &'a [ClockNodeId],
}

/// A clock-distribution tree: the node registry plus the propagation
/// engine.
///
/// The tree is built once at setup time (sources first, then derived
/// nodes that reference them) and thereafter only its scalar state
/// mutates: enables, scale factors, and input selections. Every
/// mutation ends in a recalculation pass that commits the new output
/// frequency, reports over-frequency advisories to the diagnostic sink,
/// pulses observers, and walks the fan-out.
///
/// Single-threaded by design: all operations take `&mut self` and
/// complete synchronously.
pub struct ClockTree {
    config: ClockTreeConfig,
    nodes: Vec<ClockNode>,
    sink: Arc<DiagnosticSink>,
}

impl ClockTree {
    /// Creates an empty clock tree with default capacities and a fresh
    /// diagnostic sink.
    pub fn new() -> Self {
        Self::with_config(ClockTreeConfig::default())
    }

    /// Creates an empty clock tree with the given capacities.
    pub fn with_config(config: ClockTreeConfig) -> Self {
        Self::with_sink(config, Arc::new(DiagnosticSink::new()))
    }

    /// Creates an empty clock tree reporting advisories into the given
    /// sink.
    pub fn with_sink(config: ClockTreeConfig, sink: Arc<DiagnosticSink>) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            sink,
        }
    }

    /// Returns the diagnostic sink advisories are reported into.
    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Returns the tree's capacity configuration.
    pub fn config(&self) -> ClockTreeConfig {
        self.config
    }

    // ---- Wiring API -----------------------------------------------------

    /// Creates a source node: a leaf with a fixed input frequency and no
    /// candidate inputs (an oscillator or an externally supplied clock).
    ///
    /// The first recalculation runs immediately, so an enabled source's
    /// output frequency is available as soon as this returns.
    pub fn create_source(&mut self, name: &str, frequency: Frequency, enabled: bool) -> ClockNodeId {
        let id = self.insert(ClockNode::new(name, 1, 1, enabled));
        self.set_input_freq(id, frequency);
        id
    }

    /// Creates a derived node and wires its candidate inputs.
    ///
    /// Each candidate is registered both as a candidate-input edge on the
    /// new node and as a fan-out edge on the referenced source; the two
    /// lists are inverse views of the same wiring. The initial selection
    /// is applied immediately, triggering the first recalculation.
    ///
    /// All structural validation happens before any state is committed,
    /// so a failed call leaves the tree untouched.
    pub fn create_derived(&mut self, clock: DerivedClock<'_>) -> Result<ClockNodeId, ClockTreeError> {
        if clock.multiplier == 0 || clock.divisor == 0 {
            return Err(ClockTreeError::InvalidScale {
                clock: clock.name.to_string(),
                multiplier: clock.multiplier,
                divisor: clock.divisor,
            });
        }
        if clock.candidate_inputs.len() > self.config.max_fan_in {
            return Err(ClockTreeError::FanInCapacityExceeded {
                clock: clock.name.to_string(),
                count: clock.candidate_inputs.len(),
                max: self.config.max_fan_in,
            });
        }
        if let Some(index) = clock.selected_input {
            if index >= clock.candidate_inputs.len() {
                return Err(ClockTreeError::SelectionOutOfRange {
                    clock: clock.name.to_string(),
                    index,
                    count: clock.candidate_inputs.len(),
                });
            }
        }
        for &source in clock.candidate_inputs {
            // A source listed more than once gains one fan-out edge per
            // occurrence, so count pending edges as well as existing ones.
            let pending = clock
                .candidate_inputs
                .iter()
                .filter(|&&other| other == source)
                .count();
            if self.node(source).fan_out.len() + pending > self.config.max_fan_out {
                return Err(ClockTreeError::FanOutCapacityExceeded {
                    clock: self.node(source).name.clone(),
                    child: clock.name.to_string(),
                    max: self.config.max_fan_out,
                });
            }
        }

        let mut node = ClockNode::new(clock.name, clock.multiplier, clock.divisor, clock.enabled);
        node.max_output_freq = clock.max_output_freq;
        node.candidate_inputs = clock.candidate_inputs.to_vec();
        let id = self.insert(node);
        for &source in clock.candidate_inputs {
            self.node_mut(source).fan_out.push(id);
        }
        self.apply_selection(id, clock.selected_input);
        Ok(id)
    }

    /// Registers an observer pulsed on every future output-frequency
    /// change of `id`.
    pub fn add_observer(
        &mut self,
        id: ClockNodeId,
        observer: Box<dyn PulseSink>,
    ) -> Result<(), ClockTreeError> {
        let max = self.config.max_observers;
        let node = self.node_mut(id);
        if node.observers.len() >= max {
            return Err(ClockTreeError::ObserverCapacityExceeded {
                clock: node.name.clone(),
                max,
            });
        }
        node.observers.push(observer);
        Ok(())
    }

    // ---- Mutation API ---------------------------------------------------

    /// Updates a node's multiplier/divisor ratio, then recalculates.
    pub fn set_scale(
        &mut self,
        id: ClockNodeId,
        multiplier: u32,
        divisor: u32,
    ) -> Result<(), ClockTreeError> {
        if multiplier == 0 || divisor == 0 {
            return Err(ClockTreeError::InvalidScale {
                clock: self.node(id).name.clone(),
                multiplier,
                divisor,
            });
        }
        let node = self.node_mut(id);
        node.multiplier = multiplier;
        node.divisor = divisor;
        self.recalc(id);
        Ok(())
    }

    /// Opens or closes a node's gate, then recalculates.
    ///
    /// Disabling forces the output to 0 Hz, which propagates to every
    /// descendant currently selecting this node; re-enabling recomputes
    /// from the live input frequency.
    pub fn set_enabled(&mut self, id: ClockNodeId, enabled: bool) {
        self.node_mut(id).enabled = enabled;
        self.recalc(id);
    }

    /// Changes which candidate input supplies this node.
    ///
    /// `None` deselects entirely, yielding a 0 Hz input. The node's
    /// input frequency is refreshed from the newly selected source's
    /// current output and a recalculation follows.
    pub fn select_input(
        &mut self,
        id: ClockNodeId,
        selection: Option<usize>,
    ) -> Result<(), ClockTreeError> {
        let node = self.node(id);
        if let Some(index) = selection {
            if index >= node.candidate_inputs.len() {
                return Err(ClockTreeError::SelectionOutOfRange {
                    clock: node.name.clone(),
                    index,
                    count: node.candidate_inputs.len(),
                });
            }
        }
        self.apply_selection(id, selection);
        Ok(())
    }

    // ---- Query API ------------------------------------------------------

    /// Returns whether the node's gate is open.
    ///
    /// Handles are only minted by completed `create_*` calls, so a node
    /// reachable through an ID is always fully constructed.
    pub fn is_enabled(&self, id: ClockNodeId) -> bool {
        self.node(id).enabled
    }

    /// Returns the node's last committed output frequency.
    ///
    /// Always consistent with the node's enable, scale, and selected
    /// input at the moment of the call; propagation completes inside the
    /// mutating call, so there is no staleness window.
    pub fn output_freq(&self, id: ClockNodeId) -> Frequency {
        self.node(id).output_freq
    }

    /// Returns a read-only view of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was minted by a different tree.
    pub fn node(&self, id: ClockNodeId) -> &ClockNode {
        &self.nodes[id.as_raw() as usize]
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ---- Engine ---------------------------------------------------------

    fn node_mut(&mut self, id: ClockNodeId) -> &mut ClockNode {
        &mut self.nodes[id.as_raw() as usize]
    }

    fn insert(&mut self, node: ClockNode) -> ClockNodeId {
        let id = ClockNodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Commits the selection, refreshes the input frequency from the
    /// selected source, and recalculates. Range is validated by callers.
    fn apply_selection(&mut self, id: ClockNodeId, selection: Option<usize>) {
        self.node_mut(id).selected_input = selection;
        let input = match self.node(id).selected_source() {
            Some(source) => self.node(source).output_freq,
            None => Frequency::ZERO,
        };
        self.set_input_freq(id, input);
    }

    fn set_input_freq(&mut self, id: ClockNodeId, frequency: Frequency) {
        self.node_mut(id).input_freq = frequency;
        self.recalc(id);
    }

    /// Recomputes a node's output frequency and, on change, notifies
    /// observers and propagates into the fan-out.
    ///
    /// An unchanged output stops here: no advisory, no pulses, no
    /// descent. This cut-off is what makes repeated no-op mutations free
    /// and propagation terminate at the first unaffected subtree.
    fn recalc(&mut self, id: ClockNodeId) {
        let node = self.node(id);
        let new_output = if node.enabled {
            node.input_freq.scale(node.multiplier, node.divisor)
        } else {
            Frequency::ZERO
        };
        if new_output == node.output_freq {
            return;
        }

        let over_max = node.max_output_freq.filter(|&max| new_output > max);
        self.node_mut(id).output_freq = new_output;

        if let Some(max) = over_max {
            let diag = Diagnostic::warning(
                OVER_FREQUENCY,
                format!("output frequency {new_output} exceeds maximum {max}"),
            )
            .with_clock(self.node(id).name.clone());
            self.sink.emit(diag);
        }

        // Observers are moved out while being pulsed so the node borrow
        // is not held across the calls; they have no path back into the
        // tree, so the list cannot change underneath us.
        let mut observers = std::mem::take(&mut self.node_mut(id).observers);
        for observer in observers.iter_mut() {
            observer.pulse();
        }
        self.node_mut(id).observers = observers;

        // Descend only into children whose current selection is this
        // node. A fan-out edge to a child that has since re-muxed to a
        // different candidate stays in the list but is skipped.
        let fan_out = self.node(id).fan_out.clone();
        for child in fan_out {
            if self.node(child).selected_source() == Some(id) {
                self.set_input_freq(child, new_output);
            }
        }
    }
}

impl Default for ClockTree {
    fn default() -> Self {
        Self::new()
    }
}
