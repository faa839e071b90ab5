//! Notification Component

use leptos::prelude::*;

use crate::context::use_app_context;

/// Toast for the latest notice; hides itself after a timeout
#[component]
pub fn Notification() -> impl IntoView {
    let app = use_app_context();

    move || {
        app.notice.get().map(|notice| {
            view! {
                <div class="notification" role="status" aria-live="polite">
                    <span>{notice.message}</span>
                    <button type="button" class="dismiss-btn" on:click=move |_| app.dismiss_notice()>
                        "×"
                    </button>
                </div>
            }
        })
    }
}
