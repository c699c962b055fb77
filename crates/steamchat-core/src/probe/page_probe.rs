//! Typed probes against the chat page.
//!
//! Every probe short-circuits when the page is off the chat surface, runs
//! the structural health check, and re-checks the surface after each
//! suspension point before trusting what it read.

use crate::{
    CoreResult, PageHost, PresenceState, ShellError,
    probe::{Surface, scripts},
};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::Value;
use tracing::{debug, trace};

/// Probe interface over a [`PageHost`].
pub struct PageProbe<H> {
    host: H,
    surface: Surface,
}

impl<H: PageHost> PageProbe<H> {
    /// Create probes for `host`, valid only while it shows `surface`.
    pub fn new(host: H, surface: Surface) -> Self {
        Self { host, surface }
    }

    /// The underlying host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The expected surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Shared precondition for every probe.
    pub fn on_surface(&self) -> bool {
        self.surface.matches(&self.host.current_url())
    }

    /// Current persona state.
    pub async fn persona_state(&self) -> CoreResult<PresenceState> {
        let value = self.read("persona_state", scripts::PERSONA_STATE).await?;

        value
            .as_i64()
            .map(PresenceState::from_code)
            .ok_or_else(|| unexpected("persona_state", &value))
    }

    /// Persona display name; empty when the page has none yet.
    pub async fn persona_name(&self) -> CoreResult<String> {
        let value = self.read("persona_name", scripts::PERSONA_NAME).await?;

        match value {
            Value::String(name) => Ok(name),
            Value::Null => Ok(String::new()),
            other => Err(unexpected("persona_name", &other)),
        }
    }

    /// Whether the page's connection to Steam is up.
    pub async fn is_connected(&self) -> CoreResult<bool> {
        let value = self.read("is_connected", scripts::IS_CONNECTED).await?;

        value
            .as_bool()
            .ok_or_else(|| unexpected("is_connected", &value))
    }

    /// Number of unread messages.
    pub async fn unread_count(&self) -> CoreResult<u64> {
        let value = self.read("unread_count", scripts::UNREAD_COUNT).await?;

        value
            .as_u64()
            .ok_or_else(|| unexpected("unread_count", &value))
    }

    /// Ask the page to switch persona state. No confirmation is awaited
    /// beyond the script having run.
    pub async fn set_persona_state(&self, state: PresenceState) -> CoreResult<()> {
        let Some(code) = state.code() else {
            return Err(ShellError::UnexpectedValue {
                probe: "set_persona_state",
                value: state.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        self.read("set_persona_state", &scripts::set_persona_state(code))
            .await
            .map(|_| ())
    }

    async fn read(&self, probe: &'static str, script: &str) -> CoreResult<Value> {
        self.ensure_surface(probe)?;
        self.health_check(probe).await?;

        // The page may have navigated while the health check was in flight.
        self.ensure_surface(probe)?;
        let value = self.host.execute_script(script).await?;
        self.ensure_surface(probe)?;

        Ok(value)
    }

    async fn health_check(&self, probe: &'static str) -> CoreResult<()> {
        let value = self.host.execute_script(scripts::HEALTH_CHECK).await?;

        match value {
            Value::Bool(true) => Ok(()),
            Value::String(reason) => {
                debug!(probe, reason = %reason, "Chat API health check failed");
                Err(ShellError::ProbeUnavailable {
                    reason,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            other => {
                debug!(probe, value = %other, "Chat API health check returned unexpected value");
                Err(ShellError::ProbeUnavailable {
                    reason: format!("health check returned {}", other),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    #[track_caller]
    fn ensure_surface(&self, probe: &'static str) -> CoreResult<()> {
        let current = self.host.current_url();
        let result = self.surface.check(&current);
        if result.is_err() {
            trace!(probe, url = %current, "Skipping probe off the chat surface");
        }
        result
    }
}

#[track_caller]
fn unexpected(probe: &'static str, value: &Value) -> ShellError {
    ShellError::UnexpectedValue {
        probe,
        value: value.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
