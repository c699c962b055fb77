//! SteamChat: the Steam web chat in a desktop window with a live tray icon.

mod app;
mod chat_window;
mod config;
mod error;
mod link_policy;
mod logging;
mod notification_bridge;
mod shell_event;
#[cfg(test)]
mod tests;
mod tray_manager;
mod ui_command;
mod ui_handle;

pub(crate) use {
    app::App,
    chat_window::ChatWindow,
    error::{AppError, Result as AppResult},
    notification_bridge::NotificationBridge,
    shell_event::ShellEvent,
    tray_manager::TrayManager,
    ui_command::UiCommand,
    ui_handle::{TrayHandle, UiHandle},
};

use crate::config::Config;

use std::sync::{Arc, atomic::AtomicBool};

use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy, EventLoopWindowTarget},
};
use tokio::{
    sync::{mpsc, watch},
    task::LocalSet,
};
use tracing::{debug, error, info, warn};

/// Capacity of the channel carrying native events to the app loop.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything the async runtime thread needs, handed over at startup.
struct CoreInputs {
    config: Config,
    proxy: EventLoopProxy<UiCommand>,
    url: watch::Receiver<String>,
    visible: Arc<AtomicBool>,
    events_tx: mpsc::Sender<ShellEvent>,
    events_rx: mpsc::Receiver<ShellEvent>,
}

/// Application entry point.
fn main() {
    let _log_guard = logging::init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };
    debug!(config_path = ?config.path(), "Configuration ready");

    let event_loop = EventLoopBuilder::<UiCommand>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (url_tx, url_rx) = watch::channel(config.chat.url.clone());

    // Window, webview and TrayManager live on the main thread - WebView and
    // TrayIcon are !Send on all platforms.
    let chat_window = match ChatWindow::build(
        &event_loop,
        &config,
        proxy.clone(),
        events_tx.clone(),
        url_tx,
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create chat window: {:?}", e);
            std::process::exit(1);
        }
    };

    let mut tray_manager = match TrayManager::new(&config.chat.tooltip_suffix) {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    let hide_dock_at_start =
        config.behaviour.start_minimized && config.behaviour.hide_dock_when_hidden;
    let window_events = events_tx.clone();
    let mut core_inputs = Some(CoreInputs {
        config,
        proxy,
        url: url_rx,
        visible: chat_window.visibility(),
        events_tx,
        events_rx,
    });

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(command) => {
                dispatch(command, &chat_window, &mut tray_manager, target, control_flow);
            }
            Event::WindowEvent {
                window_id, event, ..
            } if window_id == chat_window.id() => {
                let Some(shell_event) = chat_window.shell_event(&event) else {
                    return;
                };
                if let Err(e) = window_events.try_send(shell_event) {
                    warn!(error = ?e, "Dropped window event");
                }
            }
            Event::NewEvents(StartCause::Init) => {
                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                if hide_dock_at_start {
                    chat_window.set_dock_visible(target, false);
                }

                if let Some(inputs) = core_inputs.take() {
                    spawn_core(inputs);
                }
            }
            _ => {}
        }
    });
}

/// Apply a command from the async runtime to the native objects.
fn dispatch(
    command: UiCommand,
    chat_window: &ChatWindow,
    tray_manager: &mut TrayManager,
    target: &EventLoopWindowTarget<UiCommand>,
    control_flow: &mut ControlFlow,
) {
    match command {
        UiCommand::EvaluateScript { script, reply } => chat_window.evaluate(&script, reply),
        UiCommand::LoadUrl(url) => {
            if let Err(e) = chat_window.load_url(&url) {
                warn!(url = %url, error = ?e, "Failed to load URL");
            }
        }
        UiCommand::Reload => {
            if let Err(e) = chat_window.reload() {
                warn!(error = ?e, "Failed to reload page");
            }
        }
        UiCommand::ClearStorage { reply } => {
            let _ = reply.send(chat_window.clear_storage());
        }
        UiCommand::ShowWindow => chat_window.show(),
        UiCommand::HideWindow => chat_window.hide(),
        UiCommand::SetDockVisible(visible) => chat_window.set_dock_visible(target, visible),
        UiCommand::SetTrayIcon(icon) => {
            if let Err(e) = tray_manager.set_icon(icon) {
                warn!(icon = icon.resource_name(), error = ?e, "Failed to update tray icon");
            }
        }
        UiCommand::SetTooltip(text) => {
            if let Err(e) = tray_manager.set_tooltip(&text) {
                warn!(tooltip = %text, error = ?e, "Failed to update tray tooltip");
            }
        }
        UiCommand::SetMenu { items, reply } => {
            if reply.send(tray_manager.set_menu(&items)).is_err() {
                debug!("Tray menu reply dropped");
            }
        }
        UiCommand::DestroyTray => tray_manager.destroy(),
        UiCommand::Shutdown => {
            info!("Exiting event loop");
            *control_flow = ControlFlow::ExitWithCode(0);
        }
    }
}

/// Run the app loop on its own thread, on a current-thread runtime with a
/// `LocalSet`. The window and tray stay on the main thread.
fn spawn_core(inputs: CoreInputs) {
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {:?}", e);
                std::process::exit(1);
            }
        };

        let local = LocalSet::new();
        local.block_on(&rt, async move {
            let CoreInputs {
                config,
                proxy,
                url,
                visible,
                events_tx,
                events_rx,
            } = inputs;

            let window = UiHandle::new(proxy.clone(), url, visible);
            let app = match App::new(window, config, proxy.clone(), events_tx, events_rx) {
                Ok(app) => app,
                Err(e) => {
                    error!(error = ?e, "Failed to start tray synchronizer");
                    let _ = proxy.send_event(UiCommand::Shutdown);
                    return;
                }
            };

            if let Err(e) = app.run().await {
                error!(error = ?e, "App error");
            }
        });
    });
}
