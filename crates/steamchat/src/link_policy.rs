//! Where links that ask for a new window end up.
//!
//! Steam's own pages stay inside the shell; everything else goes to the
//! system browser.

use tracing::{info, warn};

/// Hosts (and their subdomains) kept inside the shell.
const INTERNAL_HOSTS: [&str; 2] = ["steamcommunity.com", "steampowered.com"];

/// Destination of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Load in the shell's own webview.
    Internal,
    /// Hand to the system browser.
    External,
}

impl LinkTarget {
    /// Classify `url`. Non-web schemes (`about:`, `data:`, `blob:`) stay
    /// internal.
    pub fn classify(url: &str) -> Self {
        let Some(host) = web_host(url) else {
            return LinkTarget::Internal;
        };

        let internal = INTERNAL_HOSTS.iter().any(|allowed| {
            host == *allowed
                || host
                    .strip_suffix(allowed)
                    .is_some_and(|prefix| prefix.ends_with('.'))
        });

        if internal {
            LinkTarget::Internal
        } else {
            LinkTarget::External
        }
    }
}

/// Open `url` in the system browser.
pub fn open_external(url: &str) {
    match open::that(url) {
        Ok(()) => info!(url = %url, "Opened link in system browser"),
        Err(e) => warn!(url = %url, error = ?e, "Failed to open link in system browser"),
    }
}

/// Lower-cased host of an `http`/`https` URL.
fn web_host(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
        return None;
    }

    let authority = rest
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = host_port
        .split_once(':')
        .map_or(host_port, |(host, _)| host);

    Some(host.to_ascii_lowercase())
}
