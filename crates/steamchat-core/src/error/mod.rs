use error_location::ErrorLocation;
use thiserror::Error;

/// Shell core errors with source location tracking.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The page is not displaying the expected chat surface.
    ///
    /// Expected while the user browses elsewhere; callers treat it as idle.
    #[error("Page is not on the chat surface: {url} {location}")]
    SurfaceMismatch {
        /// URL the page was displaying when the probe ran.
        url: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The chat application's object graph is missing or incomplete.
    #[error("Probe unavailable: {reason} {location}")]
    ProbeUnavailable {
        /// What the health check reported.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A probe returned a value of the wrong shape.
    #[error("Probe {probe} returned unexpected value {value} {location}")]
    UnexpectedValue {
        /// Name of the probe.
        probe: &'static str,
        /// The value as received.
        value: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The page threw while evaluating a script.
    #[error("Script evaluation failed: {reason} {location}")]
    ScriptFailed {
        /// Message reported by the page.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The native host can no longer be reached (event loop gone).
    #[error("Host unavailable: {reason} {location}")]
    HostUnavailable {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A native operation such as setting an icon or clearing storage failed.
    #[error("Native operation {operation} failed: {reason} {location}")]
    NativeOperation {
        /// Operation that failed.
        operation: &'static str,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Reading or writing a config value failed.
    #[error("Configuration error: {reason} {location}")]
    Config {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl ShellError {
    /// True for [`ShellError::SurfaceMismatch`].
    pub fn is_surface_mismatch(&self) -> bool {
        matches!(self, ShellError::SurfaceMismatch { .. })
    }
}

/// Result type alias using [`ShellError`].
pub type Result<T> = std::result::Result<T, ShellError>;
