mod connection_monitor;
mod options;
mod outcome;
mod probe_gate;
mod sync_context;
mod timer_registry;
mod tray_synchronizer;

pub(crate) use probe_gate::ProbeGate;

pub use {
    connection_monitor::ConnectionMonitor,
    options::{MIN_INTERVAL, STEAM_CHAT_URL, SyncIntervals, SyncOptions, TOOLTIP_SUFFIX},
    outcome::{MenuOutcome, TickOutcome},
    probe_gate::SyncPhase,
    sync_context::SyncContext,
    timer_registry::TimerRegistry,
    tray_synchronizer::TraySynchronizer,
};
