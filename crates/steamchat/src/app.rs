use crate::{
    AppResult, NotificationBridge, ShellEvent, TrayHandle, UiCommand, UiHandle, config::Config,
};

use std::{ops::ControlFlow, time::Duration};

use steamchat_core::{CloseDecision, MenuItemId, MenuOutcome, TraySynchronizer};
use tao::event_loop::EventLoopProxy;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use tray_icon::{MouseButton, MouseButtonState, TrayIconEvent, menu::MenuEvent};

/// Main application state.
///
/// Runs on the single-threaded async runtime, inside a `LocalSet`. Native
/// objects stay on the main thread and are reached through `proxy`.
pub struct App {
    pub(crate) synchronizer: TraySynchronizer<UiHandle, TrayHandle, Config>,
    pub(crate) proxy: EventLoopProxy<UiCommand>,
    pub(crate) events_tx: mpsc::Sender<ShellEvent>,
    pub(crate) events_rx: mpsc::Receiver<ShellEvent>,
    pub(crate) notifications: NotificationBridge,
}

impl App {
    /// Start the tray synchronizer for the chat window.
    ///
    /// Must be called from within a `LocalSet`.
    #[instrument(skip_all)]
    pub(crate) fn new(
        window: UiHandle,
        config: Config,
        proxy: EventLoopProxy<UiCommand>,
        events_tx: mpsc::Sender<ShellEvent>,
        events_rx: mpsc::Receiver<ShellEvent>,
    ) -> AppResult<Self> {
        let options = config.to_sync_options();
        let tray = TrayHandle::new(proxy.clone());
        let synchronizer = TraySynchronizer::create(window, tray, config, options)?;

        Ok(Self {
            synchronizer,
            proxy,
            notifications: NotificationBridge::new(events_tx.clone()),
            events_tx,
            events_rx,
        })
    }

    /// Run the main application event loop until quit.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("SteamChat starting");

        // Tray event forwarding via persistent blocking tasks.
        //
        // MenuEvent::receiver() and TrayIconEvent::receiver() return
        // crossbeam receivers with blocking recv(): zero polling, one thread
        // each. They stop on the first event after the app loop is gone.
        let menu_events = self.events_tx.clone();
        let menu_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                let id = MenuItemId::new(event.id.0);
                if menu_events
                    .blocking_send(ShellEvent::MenuClicked(id))
                    .is_err()
                {
                    break;
                }
            }
        });

        let click_events = self.events_tx.clone();
        let click_handle = tokio::task::spawn_blocking(move || {
            let receiver = TrayIconEvent::receiver();
            while let Ok(event) = receiver.recv() {
                let TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } = event
                else {
                    continue;
                };
                if click_events.blocking_send(ShellEvent::TrayClicked).is_err() {
                    break;
                }
            }
        });

        while let Some(event) = self.events_rx.recv().await {
            if self.handle_event(event).await.is_break() {
                break;
            }
        }

        drop(self.events_rx);

        self.synchronizer.destroy();
        if let Err(e) = self.proxy.send_event(UiCommand::Shutdown) {
            warn!(error = ?e, "Event loop already closed");
        }

        for (name, handle) in [("menu", menu_handle), ("tray click", click_handle)] {
            match tokio::time::timeout(Duration::from_secs(1), handle).await {
                Ok(Ok(())) => info!(forwarder = name, "Event forwarder stopped cleanly"),
                Ok(Err(e)) => error!(forwarder = name, error = ?e, "Event forwarder task panicked"),
                Err(_) => debug!(
                    forwarder = name,
                    "Event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
                ),
            }
        }

        info!("SteamChat shut down successfully");

        Ok(())
    }

    /// Dispatch one event. Breaks when the application should quit.
    #[instrument(skip(self))]
    async fn handle_event(&self, event: ShellEvent) -> ControlFlow<()> {
        let context = self.synchronizer.context();

        match event {
            ShellEvent::MenuClicked(id) => {
                if context.handle_menu_event(&id).await == MenuOutcome::Quit {
                    return ControlFlow::Break(());
                }
            }
            ShellEvent::TrayClicked => {
                // macOS opens the menu on left click instead.
                if cfg!(target_os = "macos") {
                    return ControlFlow::Continue(());
                }
                if let Err(e) = context.toggle_window() {
                    warn!(error = ?e, "Failed to toggle window from tray click");
                }
            }
            ShellEvent::CloseRequested => match context.on_close_requested() {
                Ok(CloseDecision::Hide) => {}
                Ok(CloseDecision::Quit) => {
                    info!("Window closed, quitting");
                    return ControlFlow::Break(());
                }
                Err(e) => error!(error = ?e, "Failed to handle close request"),
            },
            ShellEvent::MinimizeRequested => {
                if let Err(e) = context.on_minimize_requested() {
                    warn!(error = ?e, "Failed to handle minimize");
                }
            }
            ShellEvent::PageLoadStarted => context.on_page_load_started(),
            ShellEvent::Notify { title, body } => {
                if let Err(e) = self.notifications.show(&title, &body) {
                    warn!(error = ?e, "Failed to forward web notification");
                }
            }
            ShellEvent::NotificationClicked => {
                if let Err(e) = context.show_window() {
                    warn!(error = ?e, "Failed to show window from notification");
                }
            }
            ShellEvent::WindowDestroyed => {
                info!("Window destroyed, quitting");
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}
