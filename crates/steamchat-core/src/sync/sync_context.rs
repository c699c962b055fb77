//! Per-window synchronizer state and the tick routines run by its timers.
//!
//! All routines take `&self`: mutable state sits in `Cell`/`RefCell` and no
//! borrow is ever held across an `.await`. After every probe resumes, cached
//! values are compared afresh instead of trusting what was seen before the
//! suspension.

use crate::{
    CloseDecision, ConfigKey, ConfigStore, ConnectionState, CoreResult, IconVariant, MenuAction,
    MenuItemId, MenuModel, MinimizeDecision, PageHost, PageProbe, PresenceState, ShellError,
    StatusCache, Surface, TrayHost, WindowHost,
    sync::{ConnectionMonitor, MenuOutcome, ProbeGate, SyncOptions, SyncPhase, TickOutcome},
    visibility,
};

use std::cell::{Ref, RefCell};

use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

/// Shared state of one window's synchronizer.
pub struct SyncContext<W, T, C> {
    id: Uuid,
    page: PageProbe<W>,
    tray: T,
    config: RefCell<C>,
    options: SyncOptions,
    cache: RefCell<StatusCache>,
    menu: RefCell<MenuModel>,
    monitor: RefCell<ConnectionMonitor>,
    presence_gate: ProbeGate,
    tooltip_gate: ProbeGate,
    icon_gate: ProbeGate,
    connection_gate: ProbeGate,
}

impl<W, T, C> SyncContext<W, T, C>
where
    W: PageHost + WindowHost,
    T: TrayHost,
    C: ConfigStore,
{
    /// Context for `window`, with the standard menu built from `config`.
    ///
    /// Nothing is pushed to the tray until [`SyncContext::apply_initial`].
    pub fn new(window: W, tray: T, config: C, options: SyncOptions) -> Self {
        let menu = MenuModel::standard(&options.chat_url, &config);
        let surface = Surface::new(options.chat_url.clone());

        Self {
            id: Uuid::new_v4(),
            page: PageProbe::new(window, surface),
            tray,
            config: RefCell::new(config),
            options,
            cache: RefCell::new(StatusCache::default()),
            menu: RefCell::new(menu),
            monitor: RefCell::new(ConnectionMonitor::default()),
            presence_gate: ProbeGate::default(),
            tooltip_gate: ProbeGate::default(),
            icon_gate: ProbeGate::default(),
            connection_gate: ProbeGate::default(),
        }
    }

    /// Identifier used to correlate this window's log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The window and page host.
    pub fn window(&self) -> &W {
        self.page.host()
    }

    /// The tray host.
    pub fn tray(&self) -> &T {
        &self.tray
    }

    /// Options the context was created with.
    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Borrow the config store.
    pub fn config(&self) -> Ref<'_, C> {
        self.config.borrow()
    }

    /// Borrow the status cache.
    pub fn cache(&self) -> Ref<'_, StatusCache> {
        self.cache.borrow()
    }

    /// Borrow the current menu model.
    pub fn menu(&self) -> Ref<'_, MenuModel> {
        self.menu.borrow()
    }

    /// Borrow the connection monitor.
    pub fn monitor(&self) -> Ref<'_, ConnectionMonitor> {
        self.monitor.borrow()
    }

    /// Phase of the presence resource.
    pub fn presence_phase(&self) -> SyncPhase {
        self.presence_gate.phase()
    }

    /// Push the initial menu, tooltip and icon.
    ///
    /// A menu that cannot be attached is fatal; tooltip and icon failures are
    /// logged and retried by their timers.
    #[instrument(skip_all, fields(window_id = %self.id))]
    pub fn apply_initial(&self) -> CoreResult<()> {
        self.apply_menu()?;

        let tooltip = self.options.tooltip_suffix.clone();
        match self.tray.set_tooltip(&tooltip) {
            Ok(()) => self.cache.borrow_mut().record_tooltip(tooltip),
            Err(e) => warn!(error = ?e, "Failed to set initial tooltip"),
        }

        let icon = IconVariant::new(PresenceState::Unknown, false, self.options.platform);
        match self.tray.set_icon(icon) {
            Ok(()) => self.cache.borrow_mut().record_icon(icon),
            Err(e) => warn!(error = ?e, "Failed to set initial icon"),
        }

        Ok(())
    }

    /// Render the menu model and reassign it to the tray.
    pub fn apply_menu(&self) -> CoreResult<()> {
        let items = self.menu.borrow().render();
        self.tray.set_menu(items)
    }

    /// Probe the persona state and, on change, redecorate and reassign the
    /// menu.
    #[instrument(skip_all, fields(window_id = %self.id))]
    pub async fn update_menu_labels(&self) -> TickOutcome {
        let Some(guard) = self.presence_gate.try_begin() else {
            trace!("Presence probe still in flight, skipping tick");
            return TickOutcome::Skipped;
        };

        let presence = match self.page.persona_state().await {
            Ok(presence) => presence,
            Err(e) => {
                self.note_probe_failure("persona_state", &e);
                return TickOutcome::NoChange;
            }
        };

        guard.applying();

        if !self.cache.borrow().presence_differs(presence) {
            self.cache.borrow_mut().update_presence(presence);
            return TickOutcome::NoChange;
        }

        self.menu.borrow_mut().decorate(presence);

        match self.apply_menu() {
            Ok(()) => {
                self.cache.borrow_mut().update_presence(presence);
                info!(presence = %presence, "Presence changed");
                TickOutcome::Applied
            }
            Err(e) => {
                warn!(presence = %presence, error = ?e, "Failed to reassign tray menu");
                TickOutcome::Failed
            }
        }
    }

    /// Probe the persona name and update the tooltip when it changed.
    #[instrument(skip_all, fields(window_id = %self.id))]
    pub async fn update_tooltip(&self) -> TickOutcome {
        let Some(guard) = self.tooltip_gate.try_begin() else {
            trace!("Tooltip probe still in flight, skipping tick");
            return TickOutcome::Skipped;
        };

        let suffix = &self.options.tooltip_suffix;
        let text = match self.page.persona_name().await {
            Ok(name) => tooltip_text(&name, suffix),
            Err(e) if e.is_surface_mismatch() => {
                self.cache.borrow_mut().mark_stale();
                suffix.clone()
            }
            Err(e) => {
                self.note_probe_failure("persona_name", &e);
                return TickOutcome::NoChange;
            }
        };

        guard.applying();

        if !self.cache.borrow().tooltip_differs(&text) {
            return TickOutcome::NoChange;
        }

        match self.tray.set_tooltip(&text) {
            Ok(()) => {
                debug!(tooltip = %text, "Tooltip updated");
                self.cache.borrow_mut().record_tooltip(text);
                TickOutcome::Applied
            }
            Err(e) => {
                warn!(error = ?e, "Failed to set tray tooltip");
                TickOutcome::Failed
            }
        }
    }

    /// Probe the unread count and swap the tray icon when its inputs changed.
    #[instrument(skip_all, fields(window_id = %self.id))]
    pub async fn update_icon(&self) -> TickOutcome {
        let Some(guard) = self.icon_gate.try_begin() else {
            trace!("Icon probe still in flight, skipping tick");
            return TickOutcome::Skipped;
        };

        match self.page.unread_count().await {
            Ok(count) => self.cache.borrow_mut().set_unread(count > 0),
            Err(e) => self.note_probe_failure("unread_count", &e),
        }

        guard.applying();

        // Presence may have been refreshed while the unread probe was
        // suspended; the page may also have left the surface meanwhile.
        if !self.page.on_surface() {
            return TickOutcome::NoChange;
        }

        let variant = {
            let cache = self.cache.borrow();
            IconVariant::new(cache.presence(), cache.unread(), self.options.platform)
        };

        if self.cache.borrow().icon() == Some(variant) {
            return TickOutcome::NoChange;
        }

        match self.tray.set_icon(variant) {
            Ok(()) => {
                debug!(icon = variant.resource_name(), "Tray icon updated");
                self.cache.borrow_mut().record_icon(variant);
                TickOutcome::Applied
            }
            Err(e) => {
                warn!(icon = variant.resource_name(), error = ?e, "Failed to set tray icon");
                TickOutcome::Failed
            }
        }
    }

    /// Probe the connection and reload the chat once per detected drop.
    #[instrument(skip_all, fields(window_id = %self.id))]
    pub async fn check_connection(&self) -> TickOutcome {
        let Some(guard) = self.connection_gate.try_begin() else {
            trace!("Connection probe still in flight, skipping tick");
            return TickOutcome::Skipped;
        };

        let connected = match self.page.is_connected().await {
            Ok(connected) => connected,
            Err(e) => {
                self.note_probe_failure("is_connected", &e);
                return TickOutcome::NoChange;
            }
        };

        guard.applying();

        self.cache.borrow_mut().set_connection(if connected {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        });

        if !self.monitor.borrow_mut().observe(connected) {
            return TickOutcome::NoChange;
        }

        let url = self.page.surface().url();
        warn!(url = %url, "Chat connection lost, reloading");

        match self.window().load_url(url) {
            Ok(()) => TickOutcome::Applied,
            Err(e) => {
                error!(error = ?e, "Failed to reload chat after connection loss");
                self.monitor.borrow_mut().reload_failed();
                TickOutcome::Failed
            }
        }
    }

    /// The page signalled that a fresh load started.
    pub fn on_page_load_started(&self) {
        if self.monitor.borrow().reload_in_flight() {
            debug!(window_id = %self.id, "Page load started, reload settled");
        }
        self.monitor.borrow_mut().load_started();
    }

    /// Flip the boolean behind a settings checkbox, update the entry and
    /// reassign the menu. Returns the new value.
    #[instrument(skip(self), fields(window_id = %self.id))]
    pub fn toggle_config_menu_item(&self, key: ConfigKey) -> CoreResult<bool> {
        let value = {
            let mut config = self.config.borrow_mut();
            let value = !config.get(key);
            config.set(key, value)?;
            value
        };

        self.menu.borrow_mut().set_checked(key, value);
        self.apply_menu()?;

        info!(key = %key, value, "Setting toggled");
        Ok(value)
    }

    /// Dispatch a click on the tray menu item `id`.
    #[instrument(skip(self), fields(window_id = %self.id))]
    pub async fn handle_menu_event(&self, id: &MenuItemId) -> MenuOutcome {
        let action = self.menu.borrow().action_for(id);
        let Some(action) = action else {
            debug!("Menu event does not match the current menu");
            return MenuOutcome::Ignored;
        };

        match action {
            MenuAction::ToggleWindow => {
                if let Err(e) = self.toggle_window() {
                    warn!(error = ?e, "Failed to toggle window");
                }
            }
            MenuAction::LoadUrl(url) => {
                if let Err(e) = self.window().load_url(&url) {
                    warn!(url = %url, error = ?e, "Failed to load URL");
                }
            }
            MenuAction::ClearStorage => self.clear_storage().await,
            MenuAction::SetPresence(presence) => {
                match self.page.set_persona_state(presence).await {
                    Ok(()) => {
                        info!(presence = %presence, "Presence change requested");
                        self.update_menu_labels().await;
                    }
                    Err(e) => self.note_probe_failure("set_persona_state", &e),
                }
            }
            MenuAction::ToggleConfig(key) => {
                if let Err(e) = self.toggle_config_menu_item(key) {
                    error!(key = %key, error = ?e, "Failed to toggle setting");
                }
            }
            MenuAction::Quit => {
                info!("Quit requested from tray menu");
                return MenuOutcome::Quit;
            }
        }

        MenuOutcome::Handled
    }

    /// Reveal and focus the window.
    pub fn show_window(&self) -> CoreResult<()> {
        visibility::show_window(self.window())
    }

    /// Hide the window.
    pub fn hide_window(&self) -> CoreResult<()> {
        visibility::hide_window(self.window(), self.options.hide_dock)
    }

    /// Hide the window if visible, show it otherwise.
    pub fn toggle_window(&self) -> CoreResult<bool> {
        visibility::toggle_window(self.window(), self.options.hide_dock)
    }

    /// Apply the close intercept.
    pub fn on_close_requested(&self) -> CoreResult<CloseDecision> {
        let config = self.config.borrow();
        visibility::on_close_requested(self.window(), &*config, self.options.hide_dock)
    }

    /// Apply the minimize intercept.
    pub fn on_minimize_requested(&self) -> CoreResult<MinimizeDecision> {
        let config = self.config.borrow();
        visibility::on_minimize_requested(self.window(), &*config, self.options.hide_dock)
    }

    async fn clear_storage(&self) {
        match self.window().clear_storage().await {
            Ok(()) => {
                info!("Browsing data cleared, reloading");
                if let Err(e) = self.window().reload() {
                    warn!(error = ?e, "Failed to reload after clearing storage");
                }
            }
            Err(e) => error!(error = ?e, "Failed to clear browsing data, reload skipped"),
        }
    }

    fn note_probe_failure(&self, probe: &'static str, error: &ShellError) {
        match error {
            ShellError::SurfaceMismatch { .. } => {
                self.cache.borrow_mut().mark_stale();
                trace!(probe, "Page is off the chat surface");
            }
            ShellError::HostUnavailable { .. } => {
                warn!(probe, error = ?error, "Page host unavailable");
            }
            _ => debug!(probe, error = ?error, "Probe failed, keeping cached state"),
        }
    }
}

/// Tooltip for a persona name: `"<name> - <suffix>"`, or the suffix alone
/// when the name is blank.
pub(crate) fn tooltip_text(name: &str, suffix: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        suffix.to_string()
    } else {
        format!("{} - {}", name, suffix)
    }
}
