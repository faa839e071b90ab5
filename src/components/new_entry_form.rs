//! New Entry Form Component
//!
//! Single-field form used to add boards, lists and items.

use leptos::prelude::*;

/// Title input with a submit button. Empty titles are ignored and the
/// field is cleared after each submit.
#[component]
pub fn NewEntryForm(
    #[prop(into)] placeholder: String,
    #[prop(into)] button_label: String,
    #[prop(into, optional)] class: String,
    #[prop(into)] on_submit: Callback<String>,
) -> impl IntoView {
    let (text, set_text) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = text.get_untracked().trim().to_string();
        if title.is_empty() {
            return;
        }
        set_text.set(String::new());
        on_submit.run(title);
    };

    let class = if class.is_empty() { "new-entry-form".to_string() } else { format!("new-entry-form {class}") };

    view! {
        <form class=class on:submit=submit>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            />
            <button type="submit">{button_label}</button>
        </form>
    }
}
