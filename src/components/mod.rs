//! UI Components Module

mod archived_panel;
mod board_page;
mod context_menu;
mod delete_confirm_button;
mod drag_ghost;
mod home_page;
mod item_card;
mod item_editor;
mod list_column;
mod list_editor;
mod new_entry_form;
mod notification;
mod press;
mod tag_bar;

pub use archived_panel::ArchivedPanel;
pub use board_page::BoardPage;
pub use context_menu::ContextMenu;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drag_ghost::DragGhost;
pub use home_page::HomePage;
pub use item_card::{ItemCard, ItemCardBody};
pub use item_editor::ItemEditor;
pub use list_column::ListColumn;
pub use list_editor::ListEditor;
pub use new_entry_form::NewEntryForm;
pub use notification::Notification;
pub use tag_bar::TagBar;
