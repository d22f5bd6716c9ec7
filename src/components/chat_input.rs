//! Chat input component

use leptos::prelude::*;
use web_sys::HtmlTextAreaElement;

use crate::chat::MAX_INPUT_CHARS;

/// Tallest the textarea grows before scrolling
const MAX_HEIGHT_PX: i32 = 200;

/// Chat input with auto-resize textarea.
///
/// Enter submits, Shift+Enter inserts a newline.
#[component]
pub fn ChatInput(
    /// Current input value
    value: RwSignal<String>,
    /// Called when the user submits non-blank input
    on_submit: Callback<()>,
    /// Whether a send is in progress
    #[prop(into)]
    disabled: Signal<bool>,
    #[prop(default = "Type your message...")] placeholder: &'static str,
) -> impl IntoView {
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();

    let resize_textarea = move || {
        if let Some(textarea) = textarea_ref.get() {
            let el: &HtmlTextAreaElement = textarea.as_ref();
            let _ = el.set_attribute("style", "height: auto;");
            let height = el.scroll_height().min(MAX_HEIGHT_PX);
            let _ = el.set_attribute(
                "style",
                &format!("height: {}px; max-height: {}px;", height, MAX_HEIGHT_PX),
            );
        }
    };

    // Shrink back once the page clears the input after a send
    Effect::new(move |_| {
        if value.get().is_empty() {
            resize_textarea();
        }
    });

    let on_input = move |ev: web_sys::Event| {
        value.set(event_target_value(&ev));
        resize_textarea();
    };

    let can_submit = move || !disabled.get() && !value.get().trim().is_empty();

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            if can_submit() {
                on_submit.run(());
            }
        }
    };

    view! {
        <div class="chat-input flex items-end gap-3 p-4 border-t">
            <div class="flex-1 relative">
                <textarea
                    node_ref=textarea_ref
                    prop:value=move || value.get()
                    on:input=on_input
                    on:keydown=on_keydown
                    placeholder=placeholder
                    maxlength=MAX_INPUT_CHARS.to_string()
                    rows="1"
                    class="w-full px-4 py-3 rounded-xl resize-none focus:outline-none"
                    style="max-height: 200px;"
                ></textarea>
            </div>

            <button
                on:click=move |_| {
                    if can_submit() {
                        on_submit.run(());
                    }
                }
                disabled=move || !can_submit()
                class="btn btn-primary p-3 rounded-xl"
                aria-label="Send"
            >
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    class="w-5 h-5"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    <line x1="22" y1="2" x2="11" y2="13"></line>
                    <polygon points="22 2 15 22 11 13 2 9 22 2"></polygon>
                </svg>
            </button>
        </div>
    }
}
