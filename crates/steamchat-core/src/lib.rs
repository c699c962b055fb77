//! SteamChat Core Library
//!
//! Presence polling and tray-state synchronization for a desktop shell that
//! wraps the Steam chat web application.
//!
//! The core never touches a native UI object. Every collaborator (the page,
//! the window, the tray, the config store) is a trait, and the
//! [`TraySynchronizer`] drives them from timers on a single-threaded
//! `tokio` [`LocalSet`](tokio::task::LocalSet).
//!
//! # Example
//!
//! ```no_run
//! use steamchat_core::{
//!     ConfigStore, CoreResult, PageHost, SyncOptions, TrayHost, TraySynchronizer, WindowHost,
//! };
//!
//! async fn run<W, T, C>(window: W, tray: T, config: C) -> CoreResult<()>
//! where
//!     W: PageHost + WindowHost + 'static,
//!     T: TrayHost + 'static,
//!     C: ConfigStore + 'static,
//! {
//!     let local = tokio::task::LocalSet::new();
//!     local
//!         .run_until(async move {
//!             let synchronizer =
//!                 TraySynchronizer::create(window, tray, config, SyncOptions::default())?;
//!             tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!             synchronizer.destroy();
//!             Ok(())
//!         })
//!         .await
//! }
//! ```

mod config;
mod error;
mod menu;
mod presence;
mod probe;
mod status;
mod sync;
mod tray;
pub mod visibility;

pub use {
    config::{ConfigKey, ConfigStore},
    error::{Result as CoreResult, ShellError},
    menu::{MenuAction, MenuEntry, MenuItemId, MenuModel, RenderedItem, STATUS_MARKER},
    presence::{PersonaCode, PresenceState},
    probe::{PageHost, PageProbe, Surface, scripts},
    status::{ConnectionState, StatusCache},
    sync::{
        ConnectionMonitor, MIN_INTERVAL, MenuOutcome, STEAM_CHAT_URL, SyncContext, SyncIntervals,
        SyncOptions, SyncPhase, TOOLTIP_SUFFIX, TickOutcome, TimerRegistry, TraySynchronizer,
    },
    tray::{IconBucket, IconVariant, TrayHost, TrayPlatform},
    visibility::{CloseDecision, MinimizeDecision, WindowHost},
};

#[cfg(test)]
mod tests;
