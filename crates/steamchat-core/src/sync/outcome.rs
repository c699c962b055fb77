/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A probe for the same resource was still in flight.
    Skipped,
    /// Nothing to apply: probe failed, page elsewhere, or value unchanged.
    NoChange,
    /// A change was pushed to the tray or page.
    Applied,
    /// A change was detected but the native operation failed.
    Failed,
}

/// Result of dispatching a tray menu click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The action ran (its own failures are logged).
    Handled,
    /// The id did not match any entry of the current menu.
    Ignored,
    /// The user asked to quit; the caller tears down.
    Quit,
}
