//! Change-notification sinks pulsed by the propagation engine.

/// An edge-triggered notification target for output-frequency changes.
///
/// The engine pulses every sink registered on a node exactly once per
/// committed change, in registration order. The pulse carries no
/// payload: the receiving peripheral model re-queries the tree for the
/// frequency it cares about, which is already fully settled by the time
/// any observer fires. Analogous to an interrupt line raised on clock
/// reconfiguration.
pub trait PulseSink {
    /// Signals that the observed clock's output frequency changed.
    fn pulse(&mut self);
}

/// Wraps a closure as a [`PulseSink`].
///
/// Convenient for peripheral models and tests that only need to latch
/// or count changes.
pub fn pulse_fn<F: FnMut()>(f: F) -> impl PulseSink {
    struct FnSink<F>(F);

    impl<F: FnMut()> PulseSink for FnSink<F> {
        fn pulse(&mut self) {
            (self.0)()
        }
    }

    FnSink(f)
}
