//! End-to-end test walking the reduced STM32F4-style RCC fixture
//! through a realistic boot sequence: reset state on HSI, bring-up of
//! HSE and the PLL, the switch to full speed, and an overclock that
//! trips the advisory ceiling on every bus.

use quartz_clktree::OVER_FREQUENCY;
use quartz_common::Frequency;
use quartz_conformance::{assert_output_invariant, count_pulses, stm32f4_style_rcc};
use quartz_diagnostics::Severity;

fn mhz(value: u64) -> Frequency {
    Frequency::from_hz(value * 1_000_000)
}

#[test]
fn reset_state_runs_on_hsi() {
    let fix = stm32f4_style_rcc();
    assert_eq!(fix.tree.output_freq(fix.hsi), mhz(16));
    assert_eq!(fix.tree.output_freq(fix.hse), Frequency::ZERO);
    assert_eq!(fix.tree.output_freq(fix.pll), Frequency::ZERO);
    assert_eq!(fix.tree.output_freq(fix.sysclk), mhz(16));
    assert_eq!(fix.tree.output_freq(fix.ahb), mhz(16));
    assert_eq!(fix.tree.output_freq(fix.apb1), mhz(4));
    assert!(fix.tree.sink().is_empty());
    assert_output_invariant(&fix.tree);
}

#[test]
fn boot_sequence_reaches_full_speed_without_advisories() {
    let mut fix = stm32f4_style_rcc();

    // HSE ready. Nothing downstream selects it yet.
    fix.tree.set_enabled(fix.hse, true);
    assert_eq!(fix.tree.output_freq(fix.hse), mhz(8));
    assert_eq!(fix.tree.output_freq(fix.sysclk), mhz(16));

    // PLL locked: 8 MHz x 21 = 168 MHz, exactly at the ceiling.
    fix.tree.set_enabled(fix.pll, true);
    assert_eq!(fix.tree.output_freq(fix.pll), mhz(168));
    assert!(fix.tree.sink().is_empty());

    // Switch the system clock over to the PLL.
    fix.tree.select_input(fix.sysclk, Some(2)).unwrap();
    assert_eq!(fix.tree.output_freq(fix.sysclk), mhz(168));
    assert_eq!(fix.tree.output_freq(fix.ahb), mhz(168));
    assert_eq!(fix.tree.output_freq(fix.apb1), mhz(42));

    // Running at the rated maximum produces no advisory.
    assert!(fix.tree.sink().is_empty());
    assert_output_invariant(&fix.tree);
}

#[test]
fn sysclk_switch_pulses_every_bus_once() {
    let mut fix = stm32f4_style_rcc();
    fix.tree.set_enabled(fix.hse, true);
    fix.tree.set_enabled(fix.pll, true);

    let sysclk_pulses = count_pulses(&mut fix.tree, fix.sysclk);
    let ahb_pulses = count_pulses(&mut fix.tree, fix.ahb);
    let apb1_pulses = count_pulses(&mut fix.tree, fix.apb1);

    fix.tree.select_input(fix.sysclk, Some(2)).unwrap();
    assert_eq!(sysclk_pulses.get(), 1);
    assert_eq!(ahb_pulses.get(), 1);
    assert_eq!(apb1_pulses.get(), 1);
}

#[test]
fn overclock_warns_on_every_bus_but_keeps_the_value() {
    let mut fix = stm32f4_style_rcc();
    fix.tree.set_enabled(fix.hse, true);
    fix.tree.set_enabled(fix.pll, true);
    fix.tree.select_input(fix.sysclk, Some(2)).unwrap();
    assert!(fix.tree.sink().is_empty());

    // 8 MHz x 25 = 200 MHz: above the 168 MHz rating of PLLCLK,
    // SYSCLK, and HCLK, and 200/4 = 50 MHz is above PCLK1's 42 MHz.
    fix.tree.set_scale(fix.pll, 25, 1).unwrap();

    assert_eq!(fix.tree.output_freq(fix.pll), mhz(200));
    assert_eq!(fix.tree.output_freq(fix.sysclk), mhz(200));
    assert_eq!(fix.tree.output_freq(fix.ahb), mhz(200));
    assert_eq!(fix.tree.output_freq(fix.apb1), mhz(50));

    let diags = fix.tree.sink().diagnostics();
    assert_eq!(diags.len(), 4);
    let clocks: Vec<_> = diags.iter().filter_map(|d| d.clock.as_deref()).collect();
    assert_eq!(clocks, ["PLLCLK", "SYSCLK", "HCLK", "PCLK1"]);
    for diag in &diags {
        assert_eq!(diag.code, OVER_FREQUENCY);
        assert_eq!(diag.severity, Severity::Warning);
    }
    // Advisory only: no errors, and the values stand.
    assert!(!fix.tree.sink().has_errors());
    assert_output_invariant(&fix.tree);
}

#[test]
fn falling_back_to_hsi_survives_pll_shutdown() {
    let mut fix = stm32f4_style_rcc();
    fix.tree.set_enabled(fix.hse, true);
    fix.tree.set_enabled(fix.pll, true);
    fix.tree.select_input(fix.sysclk, Some(2)).unwrap();

    // Drop back to the internal oscillator, then power the PLL down.
    fix.tree.select_input(fix.sysclk, Some(0)).unwrap();
    fix.tree.set_enabled(fix.pll, false);
    fix.tree.set_enabled(fix.hse, false);

    assert_eq!(fix.tree.output_freq(fix.sysclk), mhz(16));
    assert_eq!(fix.tree.output_freq(fix.ahb), mhz(16));
    assert_eq!(fix.tree.output_freq(fix.apb1), mhz(4));
    assert_output_invariant(&fix.tree);
}
