use std::cell::Cell;

/// Per-resource synchronizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    /// Waiting for the next tick.
    #[default]
    Idle,
    /// A probe is in flight.
    Probing,
    /// A probed value is being pushed to the tray.
    Applying,
}

/// Admits at most one probe per resource at a time.
#[derive(Debug, Default)]
pub(crate) struct ProbeGate {
    phase: Cell<SyncPhase>,
}

impl ProbeGate {
    pub(crate) fn phase(&self) -> SyncPhase {
        self.phase.get()
    }

    /// Move Idle -> Probing, or `None` if a probe is already running.
    pub(crate) fn try_begin(&self) -> Option<GateGuard<'_>> {
        if self.phase.get() != SyncPhase::Idle {
            return None;
        }
        self.phase.set(SyncPhase::Probing);
        Some(GateGuard { gate: self })
    }
}

/// RAII guard returning its gate to Idle when dropped.
///
/// Every exit path of a tick, early returns included, ends the phase.
pub(crate) struct GateGuard<'a> {
    gate: &'a ProbeGate,
}

impl GateGuard<'_> {
    pub(crate) fn applying(&self) {
        self.gate.phase.set(SyncPhase::Applying);
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.phase.set(SyncPhase::Idle);
    }
}
