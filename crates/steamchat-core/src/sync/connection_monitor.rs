/// Debounces reloads triggered by a dropped connection.
///
/// One reload per detected drop: once a reload is issued, further
/// `false` readings are ignored until the page reports a live connection
/// again or a fresh page load starts.
#[derive(Debug, Default)]
pub struct ConnectionMonitor {
    reload_in_flight: bool,
    reloads: u64,
}

impl ConnectionMonitor {
    /// Feed one connection reading. Returns `true` when a reload should be
    /// issued now.
    pub fn observe(&mut self, connected: bool) -> bool {
        if connected {
            self.reload_in_flight = false;
            return false;
        }

        if self.reload_in_flight {
            return false;
        }

        self.reload_in_flight = true;
        self.reloads += 1;
        true
    }

    /// The page started a fresh load.
    pub fn load_started(&mut self) {
        self.reload_in_flight = false;
    }

    /// The issued reload could not be started; allow the next tick to retry.
    pub fn reload_failed(&mut self) {
        self.reload_in_flight = false;
    }

    /// Whether a reload was issued and not yet resolved.
    pub fn reload_in_flight(&self) -> bool {
        self.reload_in_flight
    }

    /// Reloads issued since creation.
    pub fn reloads(&self) -> u64 {
        self.reloads
    }
}
