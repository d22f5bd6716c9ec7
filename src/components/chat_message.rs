//! Chat message bubble

use leptos::prelude::*;

use crate::types::{Message, Role};

/// Render a single chat message
#[component]
pub fn ChatMessage(
    message: Message,
    /// Label over assistant bubbles
    #[prop(into)]
    assistant_name: Signal<String>,
) -> impl IntoView {
    let is_user = message.role == Role::User;
    let text = message.display_text();
    let time = message
        .timestamp
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();

    view! {
        <div class=format!(
            "flex items-start gap-3 message-appear {}",
            if is_user { "flex-row-reverse" } else { "" }
        )>
            // Avatar
            <div class=format!(
                "w-8 h-8 rounded-full flex items-center justify-center text-white text-sm font-medium shrink-0 {}",
                if is_user { "avatar-user" } else { "avatar-assistant" }
            )>
                {if is_user { "👤" } else { "🤖" }}
            </div>

            <div class=format!(
                "flex flex-col gap-1 max-w-[80%] {}",
                if is_user { "items-end" } else { "items-start" }
            )>
                {(!is_user).then(|| view! {
                    <span class="text-xs text-zinc-500 font-medium">
                        {move || assistant_name.get()}
                    </span>
                })}

                <div class=format!(
                    "px-4 py-3 rounded-2xl {}",
                    if is_user {
                        "bubble-user rounded-tr-sm"
                    } else {
                        "bubble-assistant rounded-tl-sm"
                    }
                )>
                    <div class="whitespace-pre-wrap break-words">
                        {text}
                    </div>
                </div>

                <span class="text-xs text-zinc-600 mt-1">{time}</span>
            </div>
        </div>
    }
}
