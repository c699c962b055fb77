//! Lifecycle of one window's synchronizer: create starts every timer,
//! destroy cancels them and removes the tray.

use crate::{
    ConfigStore, CoreResult, PageHost, TrayHost, WindowHost,
    sync::{SyncContext, SyncOptions, TickOutcome, TimerRegistry},
};

use std::{future::Future, rc::Rc, time::Duration};

use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, trace};

/// Handle owning a window's synchronizer context and timers.
pub struct TraySynchronizer<W, T, C> {
    context: Rc<SyncContext<W, T, C>>,
    timers: TimerRegistry,
}

impl<W, T, C> TraySynchronizer<W, T, C>
where
    W: PageHost + WindowHost + 'static,
    T: TrayHost + 'static,
    C: ConfigStore + 'static,
{
    /// Build the menu, push the initial tray state and start the menu,
    /// tooltip, icon and connection timers.
    ///
    /// Must be called from within a [`LocalSet`](tokio::task::LocalSet).
    #[instrument(skip_all)]
    pub fn create(window: W, tray: T, config: C, options: SyncOptions) -> CoreResult<Self> {
        let context = Rc::new(SyncContext::new(window, tray, config, options));
        context.apply_initial()?;

        let intervals = context.options().intervals.clamped();
        let mut timers = TimerRegistry::new();

        spawn_ticker(&mut timers, "menu_labels", intervals.menu, &context, |ctx| async move {
            ctx.update_menu_labels().await
        });
        spawn_ticker(&mut timers, "tooltip", intervals.tooltip, &context, |ctx| async move {
            ctx.update_tooltip().await
        });
        spawn_ticker(&mut timers, "icon", intervals.icon, &context, |ctx| async move {
            ctx.update_icon().await
        });
        spawn_ticker(
            &mut timers,
            "connection",
            intervals.connection,
            &context,
            |ctx| async move { ctx.check_connection().await },
        );

        info!(
            window_id = %context.id(),
            timers = timers.len(),
            "Tray synchronizer started"
        );

        Ok(Self { context, timers })
    }

    /// The shared context, for event handlers.
    pub fn context(&self) -> &Rc<SyncContext<W, T, C>> {
        &self.context
    }

    /// Timers still running.
    pub fn active_timers(&self) -> usize {
        self.timers.active()
    }

    /// Cancel every timer and remove the tray icon.
    #[instrument(skip_all, fields(window_id = %self.context.id()))]
    pub fn destroy(mut self) {
        self.timers.cancel_all();
        self.context.tray().destroy();
        info!("Tray synchronizer destroyed");
    }
}

fn spawn_ticker<W, T, C, F, Fut>(
    timers: &mut TimerRegistry,
    name: &'static str,
    period: Duration,
    context: &Rc<SyncContext<W, T, C>>,
    tick: F,
) where
    W: 'static,
    T: 'static,
    C: 'static,
    F: Fn(Rc<SyncContext<W, T, C>>) -> Fut + 'static,
    Fut: Future<Output = TickOutcome> + 'static,
{
    let context = Rc::downgrade(context);

    timers.spawn(name, async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let Some(context) = context.upgrade() else {
                debug!(timer = name, "Window gone, timer exiting");
                break;
            };

            let outcome = tick(context).await;
            trace!(timer = name, ?outcome, "Tick finished");
        }
    });
}
