//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::fmt::Display;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder::Vector2;
use tracing::warn;

use crate::repository::LocalStore;

/// Toast shown after a failure
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Open context menu for an item
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContextMenuState {
    pub item_id: u32,
    pub at: Vector2,
}

/// App-wide handles and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    repo: StoredValue<Rc<LocalStore>, LocalStorage>,
    /// Current notification - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Current notification - write
    set_notice: WriteSignal<Option<Notice>>,
    /// Open context menu - read
    pub context_menu: ReadSignal<Option<ContextMenuState>>,
    /// Open context menu - write
    set_context_menu: WriteSignal<Option<ContextMenuState>>,
    notice_seq: StoredValue<u64>,
    notification_timeout_ms: u32,
}

impl AppContext {
    pub fn new(repo: Rc<LocalStore>, notification_timeout_ms: u32) -> Self {
        let (notice, set_notice) = signal(None::<Notice>);
        let (context_menu, set_context_menu) = signal(None::<ContextMenuState>);
        Self {
            repo: StoredValue::new_local(repo),
            notice,
            set_notice,
            context_menu,
            set_context_menu,
            notice_seq: StoredValue::new(0),
            notification_timeout_ms,
        }
    }

    pub fn repo(&self) -> Rc<LocalStore> {
        self.repo.get_value()
    }

    /// Show a notification that hides itself after the configured timeout
    pub fn notify(&self, message: impl Into<String>) {
        self.notice_seq.update_value(|n| *n += 1);
        let id = self.notice_seq.get_value();
        self.set_notice.set(Some(Notice { id, message: message.into() }));

        let notice = self.notice;
        let set_notice = self.set_notice;
        let timeout = self.notification_timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            if notice.get_untracked().is_some_and(|n| n.id == id) {
                set_notice.set(None);
            }
        });
    }

    /// Log a failed operation and tell the user
    pub fn report(&self, action: &str, err: impl Display) {
        warn!(action, error = %err, "operation failed");
        self.notify(format!("Could not {action}: {err}"));
    }

    pub fn dismiss_notice(&self) {
        self.set_notice.set(None);
    }

    pub fn open_context_menu(&self, item_id: u32, at: Vector2) {
        self.set_context_menu.set(Some(ContextMenuState { item_id, at }));
    }

    pub fn close_context_menu(&self) {
        self.set_context_menu.set(None);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
