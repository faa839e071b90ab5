//! Laneboard App
//!
//! Root component: provides the store, app context and drag context, binds
//! the document-level drag listeners and switches between home and board.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder::dom::bind_global_listeners;
use leptos_reorder::provide_interaction_context;
use reactive_stores::Store;

use crate::commands;
use crate::components::{BoardPage, HomePage, Notification};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::repository::LocalStore;
use crate::store::{AppState, AppStateStoreFields, BoardState};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let repo = Rc::new(LocalStore::open(&config.storage_key));
    let app = AppContext::new(repo, config.notification_timeout_ms);
    provide_context(app);

    let interaction = provide_interaction_context(config.dnd());
    bind_global_listeners(interaction, move || {
        interaction.release_drag(BoardState(store), app.repo(), move |err| app.report("move", err));
    });

    spawn_local(commands::load_boards(app, store));

    // Reopening the same board only refreshes its contents
    let open_board = Memo::new(move |_| store.current_board().get());

    view! {
        <main class="app">
            {move || match open_board.get() {
                Some(board_id) => view! { <BoardPage board_id=board_id /> }.into_any(),
                None => view! { <HomePage /> }.into_any(),
            }}
            <Notification />
        </main>
    }
}
