mod action;
mod entry;
mod model;

pub use {
    action::{MenuAction, MenuItemId},
    entry::MenuEntry,
    model::{MenuModel, RenderedItem, STATUS_MARKER},
};
