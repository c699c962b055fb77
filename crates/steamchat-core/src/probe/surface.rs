use crate::{CoreResult, ShellError};

use std::panic::Location;

use error_location::ErrorLocation;

/// The page the webview must be displaying for probes to mean anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    url: String,
}

impl Surface {
    /// Surface rooted at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The surface URL, as configured.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether `current` is this surface.
    ///
    /// Fragments and a trailing slash are ignored; the path must otherwise
    /// match exactly, so sub-pages of the chat site do not count.
    pub fn matches(&self, current: &str) -> bool {
        normalize(current) == normalize(&self.url)
    }

    /// Fail with [`ShellError::SurfaceMismatch`] unless `current` matches.
    #[track_caller]
    pub fn check(&self, current: &str) -> CoreResult<()> {
        if self.matches(current) {
            return Ok(());
        }

        Err(ShellError::SurfaceMismatch {
            url: current.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

fn normalize(url: &str) -> &str {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.trim_end_matches('/')
}
