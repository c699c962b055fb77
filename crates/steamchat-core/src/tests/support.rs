//! In-memory collaborators for driving the synchronizer without a webview.

use crate::{
    ConfigKey, ConfigStore, CoreResult, IconVariant, PageHost, RenderedItem, STEAM_CHAT_URL,
    ShellError, SyncContext, SyncIntervals, SyncOptions, TrayHost, TrayPlatform, WindowHost,
    scripts,
};

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    panic::Location,
    rc::Rc,
    time::Duration,
};

use error_location::ErrorLocation;
use serde_json::Value;
use tokio::sync::Notify;

pub(crate) type TestContext = SyncContext<FakePage, FakeTray, MemoryConfig>;

#[derive(Default)]
pub(crate) struct PageState {
    url: RefCell<String>,
    values: RefCell<HashMap<String, Value>>,
    queued: RefCell<HashMap<String, VecDeque<Value>>>,
    executed: RefCell<Vec<String>>,
    navigate_during_script: RefCell<Option<String>>,
    stalled: Cell<bool>,
    release: Notify,
    loaded: RefCell<Vec<String>>,
    fail_load: Cell<bool>,
    reloads: Cell<usize>,
    fail_clear_storage: Cell<bool>,
    storage_clears: Cell<usize>,
    visible: Cell<bool>,
    shows: Cell<usize>,
    hides: Cell<usize>,
    dock: RefCell<Vec<bool>>,
}

/// Scriptable page and window.
#[derive(Clone)]
pub(crate) struct FakePage {
    state: Rc<PageState>,
}

impl FakePage {
    /// A healthy page on the chat surface, window visible.
    pub(crate) fn on_chat() -> Self {
        let page = Self {
            state: Rc::new(PageState::default()),
        };
        page.navigate(STEAM_CHAT_URL);
        page.set_value(scripts::HEALTH_CHECK, Value::Bool(true));
        page.state.visible.set(true);
        page
    }

    pub(crate) fn navigate(&self, url: &str) {
        *self.state.url.borrow_mut() = url.to_string();
    }

    pub(crate) fn navigate_during_next_script(&self, url: &str) {
        *self.state.navigate_during_script.borrow_mut() = Some(url.to_string());
    }

    pub(crate) fn set_value(&self, script: &str, value: Value) {
        self.state
            .values
            .borrow_mut()
            .insert(script.to_string(), value);
    }

    pub(crate) fn queue(&self, script: &str, values: impl IntoIterator<Item = Value>) {
        self.state
            .queued
            .borrow_mut()
            .entry(script.to_string())
            .or_default()
            .extend(values);
    }

    pub(crate) fn executed(&self) -> Vec<String> {
        self.state.executed.borrow().clone()
    }

    pub(crate) fn executed_count(&self, script: &str) -> usize {
        self.state
            .executed
            .borrow()
            .iter()
            .filter(|executed| executed.as_str() == script)
            .count()
    }

    pub(crate) fn stall(&self) {
        self.state.stalled.set(true);
    }

    pub(crate) fn release(&self) {
        self.state.stalled.set(false);
        self.state.release.notify_waiters();
    }

    pub(crate) fn loaded(&self) -> Vec<String> {
        self.state.loaded.borrow().clone()
    }

    pub(crate) fn fail_load(&self, fail: bool) {
        self.state.fail_load.set(fail);
    }

    pub(crate) fn reloads(&self) -> usize {
        self.state.reloads.get()
    }

    pub(crate) fn fail_clear_storage(&self, fail: bool) {
        self.state.fail_clear_storage.set(fail);
    }

    pub(crate) fn storage_clears(&self) -> usize {
        self.state.storage_clears.get()
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.state.visible.set(visible);
    }

    pub(crate) fn shows(&self) -> usize {
        self.state.shows.get()
    }

    pub(crate) fn hides(&self) -> usize {
        self.state.hides.get()
    }

    pub(crate) fn dock(&self) -> Vec<bool> {
        self.state.dock.borrow().clone()
    }
}

impl PageHost for FakePage {
    fn current_url(&self) -> String {
        self.state.url.borrow().clone()
    }

    async fn execute_script(&self, script: &str) -> CoreResult<Value> {
        self.state.executed.borrow_mut().push(script.to_string());

        if self.state.stalled.get() {
            self.state.release.notified().await;
        }

        let navigation = self.state.navigate_during_script.borrow_mut().take();
        if let Some(url) = navigation {
            self.navigate(&url);
        }

        let queued = self
            .state
            .queued
            .borrow_mut()
            .get_mut(script)
            .and_then(|values| values.pop_front());

        Ok(queued
            .or_else(|| self.state.values.borrow().get(script).cloned())
            .unwrap_or(Value::Null))
    }

    fn load_url(&self, url: &str) -> CoreResult<()> {
        if self.state.fail_load.get() {
            return Err(native_failure("load_url"));
        }
        self.state.loaded.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn reload(&self) -> CoreResult<()> {
        self.state.reloads.set(self.state.reloads.get() + 1);
        Ok(())
    }

    async fn clear_storage(&self) -> CoreResult<()> {
        if self.state.fail_clear_storage.get() {
            return Err(native_failure("clear_storage"));
        }
        self.state
            .storage_clears
            .set(self.state.storage_clears.get() + 1);
        Ok(())
    }
}

impl WindowHost for FakePage {
    fn is_visible(&self) -> bool {
        self.state.visible.get()
    }

    fn show(&self) -> CoreResult<()> {
        self.state.visible.set(true);
        self.state.shows.set(self.state.shows.get() + 1);
        Ok(())
    }

    fn hide(&self) -> CoreResult<()> {
        self.state.visible.set(false);
        self.state.hides.set(self.state.hides.get() + 1);
        Ok(())
    }

    fn set_dock_visible(&self, visible: bool) {
        self.state.dock.borrow_mut().push(visible);
    }
}

#[derive(Default)]
pub(crate) struct TrayState {
    menus: RefCell<Vec<Vec<RenderedItem>>>,
    tooltips: RefCell<Vec<String>>,
    icons: RefCell<Vec<IconVariant>>,
    fail_menu: Cell<bool>,
    destroyed: Cell<bool>,
}

/// Records every tray write.
#[derive(Clone, Default)]
pub(crate) struct FakeTray {
    state: Rc<TrayState>,
}

impl FakeTray {
    pub(crate) fn menus(&self) -> Vec<Vec<RenderedItem>> {
        self.state.menus.borrow().clone()
    }

    pub(crate) fn menu_count(&self) -> usize {
        self.state.menus.borrow().len()
    }

    pub(crate) fn last_menu(&self) -> Option<Vec<RenderedItem>> {
        self.state.menus.borrow().last().cloned()
    }

    pub(crate) fn tooltips(&self) -> Vec<String> {
        self.state.tooltips.borrow().clone()
    }

    pub(crate) fn icons(&self) -> Vec<IconVariant> {
        self.state.icons.borrow().clone()
    }

    pub(crate) fn fail_menu(&self, fail: bool) {
        self.state.fail_menu.set(fail);
    }

    pub(crate) fn destroyed(&self) -> bool {
        self.state.destroyed.get()
    }
}

impl TrayHost for FakeTray {
    fn set_icon(&self, icon: IconVariant) -> CoreResult<()> {
        self.state.icons.borrow_mut().push(icon);
        Ok(())
    }

    fn set_tooltip(&self, text: &str) -> CoreResult<()> {
        self.state.tooltips.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn set_menu(&self, items: Vec<RenderedItem>) -> CoreResult<()> {
        if self.state.fail_menu.get() {
            return Err(native_failure("set_menu"));
        }
        self.state.menus.borrow_mut().push(items);
        Ok(())
    }

    fn destroy(&self) {
        self.state.destroyed.set(true);
    }
}

/// Config store recording every write.
#[derive(Clone, Default)]
pub(crate) struct MemoryConfig {
    values: Rc<RefCell<HashMap<ConfigKey, bool>>>,
    writes: Rc<RefCell<Vec<(ConfigKey, bool)>>>,
}

impl MemoryConfig {
    pub(crate) fn with(values: &[(ConfigKey, bool)]) -> Self {
        let config = Self::default();
        config.values.borrow_mut().extend(values.iter().copied());
        config
    }

    pub(crate) fn writes(&self) -> Vec<(ConfigKey, bool)> {
        self.writes.borrow().clone()
    }
}

impl ConfigStore for MemoryConfig {
    fn get(&self, key: ConfigKey) -> bool {
        self.values.borrow().get(&key).copied().unwrap_or(false)
    }

    fn set(&mut self, key: ConfigKey, value: bool) -> CoreResult<()> {
        self.values.borrow_mut().insert(key, value);
        self.writes.borrow_mut().push((key, value));
        Ok(())
    }
}

pub(crate) fn options() -> SyncOptions {
    SyncOptions {
        intervals: SyncIntervals {
            menu: Duration::from_millis(1000),
            tooltip: Duration::from_millis(1000),
            icon: Duration::from_millis(1000),
            connection: Duration::from_millis(5000),
        },
        platform: TrayPlatform::Other,
        ..SyncOptions::default()
    }
}

pub(crate) fn context(page: &FakePage, tray: &FakeTray, config: &MemoryConfig) -> TestContext {
    SyncContext::new(page.clone(), tray.clone(), config.clone(), options())
}

/// Labels of the top-level rendered items, submenus flattened.
pub(crate) fn labels(items: &[RenderedItem]) -> Vec<String> {
    let mut labels = Vec::new();
    for item in items {
        match item {
            RenderedItem::Item { label, .. } | RenderedItem::Check { label, .. } => {
                labels.push(label.clone())
            }
            RenderedItem::Submenu { items, .. } => labels.extend(self::labels(items)),
            RenderedItem::Separator => {}
        }
    }
    labels
}

#[track_caller]
fn native_failure(operation: &'static str) -> ShellError {
    ShellError::NativeOperation {
        operation,
        reason: "simulated failure".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
