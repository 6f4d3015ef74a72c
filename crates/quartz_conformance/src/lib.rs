//! Reusable clock-tree fixtures for conformance testing.
//!
//! The fixtures here stand in for the board-wiring layer: each builds a
//! small but realistic topology leaf-first and hands back the handles a
//! test needs. The RCC fixture follows a reduced STM32F4-style reset
//! state: the internal oscillator running, the external oscillator and
//! PLL off, and the system clock mux parked on the internal oscillator.

#![warn(missing_docs)]

use std::cell::Cell;
use std::rc::Rc;

use quartz_clktree::{pulse_fn, ClockNodeId, ClockTree, DerivedClock};
use quartz_common::Frequency;

/// A three-stage chain: an 8 MHz source, a x2 PLL stage, and a /2
/// divider hanging off the PLL.
pub struct ChainFixture {
    /// The tree owning the chain.
    pub tree: ClockTree,
    /// 8 MHz source, enabled.
    pub source: ClockNodeId,
    /// x2 stage selecting `source`.
    pub pll: ClockNodeId,
    /// /2 stage selecting `pll`.
    pub divider: ClockNodeId,
}

/// Builds the standard source → x2 → /2 chain.
pub fn frequency_chain() -> ChainFixture {
    let mut tree = ClockTree::new();
    let source = tree.create_source("OSC", Frequency::from_hz(8_000_000), true);
    let pll = tree
        .create_derived(DerivedClock {
            name: "PLL",
            multiplier: 2,
            divisor: 1,
            enabled: true,
            max_output_freq: None,
            selected_input: Some(0),
            candidate_inputs: &[source],
        })
        .expect("chain fixture wiring");
    let divider = tree
        .create_derived(DerivedClock {
            name: "DIV2",
            multiplier: 1,
            divisor: 2,
            enabled: true,
            max_output_freq: None,
            selected_input: Some(0),
            candidate_inputs: &[pll],
        })
        .expect("chain fixture wiring");
    ChainFixture {
        tree,
        source,
        pll,
        divider,
    }
}

/// A two-way multiplexer over a 4 MHz and a 6 MHz source, initially
/// selecting the 4 MHz one.
pub struct MuxFixture {
    /// The tree owning the mux.
    pub tree: ClockTree,
    /// 4 MHz source (candidate 0).
    pub source_a: ClockNodeId,
    /// 6 MHz source (candidate 1).
    pub source_b: ClockNodeId,
    /// The mux node, selecting candidate 0.
    pub mux: ClockNodeId,
}

/// Builds the standard two-source mux.
pub fn two_source_mux() -> MuxFixture {
    let mut tree = ClockTree::new();
    let source_a = tree.create_source("OSC_A", Frequency::from_hz(4_000_000), true);
    let source_b = tree.create_source("OSC_B", Frequency::from_hz(6_000_000), true);
    let mux = tree
        .create_derived(DerivedClock {
            name: "MUX",
            multiplier: 1,
            divisor: 1,
            enabled: true,
            max_output_freq: None,
            selected_input: Some(0),
            candidate_inputs: &[source_a, source_b],
        })
        .expect("mux fixture wiring");
    MuxFixture {
        tree,
        source_a,
        source_b,
        mux,
    }
}

/// A reduced STM32F4-style RCC topology in its reset state.
pub struct RccFixture {
    /// The tree owning the subsystem.
    pub tree: ClockTree,
    /// 16 MHz internal oscillator, running at reset.
    pub hsi: ClockNodeId,
    /// 8 MHz external oscillator, off at reset.
    pub hse: ClockNodeId,
    /// PLL fed from HSE (x21 when tuned for 168 MHz), off at reset.
    pub pll: ClockNodeId,
    /// System clock mux over [HSI, HSE, PLL], parked on HSI.
    pub sysclk: ClockNodeId,
    /// AHB prescaler (/1) below SYSCLK.
    pub ahb: ClockNodeId,
    /// APB1 prescaler (/4) below AHB, rated 42 MHz.
    pub apb1: ClockNodeId,
}

/// Builds the reduced RCC topology.
pub fn stm32f4_style_rcc() -> RccFixture {
    let mut tree = ClockTree::new();
    let hsi = tree.create_source("HSI", Frequency::from_hz(16_000_000), true);
    let hse = tree.create_source("HSE", Frequency::from_hz(8_000_000), false);
    let pll = tree
        .create_derived(DerivedClock {
            name: "PLLCLK",
            multiplier: 21,
            divisor: 1,
            enabled: false,
            max_output_freq: Some(Frequency::from_hz(168_000_000)),
            selected_input: Some(1),
            candidate_inputs: &[hsi, hse],
        })
        .expect("rcc fixture wiring");
    let sysclk = tree
        .create_derived(DerivedClock {
            name: "SYSCLK",
            multiplier: 1,
            divisor: 1,
            enabled: true,
            max_output_freq: Some(Frequency::from_hz(168_000_000)),
            selected_input: Some(0),
            candidate_inputs: &[hsi, hse, pll],
        })
        .expect("rcc fixture wiring");
    let ahb = tree
        .create_derived(DerivedClock {
            name: "HCLK",
            multiplier: 1,
            divisor: 1,
            enabled: true,
            max_output_freq: Some(Frequency::from_hz(168_000_000)),
            selected_input: Some(0),
            candidate_inputs: &[sysclk],
        })
        .expect("rcc fixture wiring");
    let apb1 = tree
        .create_derived(DerivedClock {
            name: "PCLK1",
            multiplier: 1,
            divisor: 4,
            enabled: true,
            max_output_freq: Some(Frequency::from_hz(42_000_000)),
            selected_input: Some(0),
            candidate_inputs: &[ahb],
        })
        .expect("rcc fixture wiring");
    RccFixture {
        tree,
        hsi,
        hse,
        pll,
        sysclk,
        ahb,
        apb1,
    }
}

/// Registers a counting observer on `id` and returns the shared counter.
pub fn count_pulses(tree: &mut ClockTree, id: ClockNodeId) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0u32));
    let inner = Rc::clone(&count);
    tree.add_observer(id, Box::new(pulse_fn(move || inner.set(inner.get() + 1))))
        .expect("observer capacity");
    count
}

/// Asserts the output invariant for every node in the tree:
/// `output == if enabled { input * multiplier / divisor } else { 0 }`.
pub fn assert_output_invariant(tree: &ClockTree) {
    for raw in 0..tree.node_count() as u32 {
        let node = tree.node(ClockNodeId::from_raw(raw));
        let expected = if node.enabled() {
            node.input_freq().scale(node.multiplier(), node.divisor())
        } else {
            Frequency::ZERO
        };
        assert_eq!(
            node.output_freq(),
            expected,
            "invariant violated on clock '{}'",
            node.name()
        );
    }
}
