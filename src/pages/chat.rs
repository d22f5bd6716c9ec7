//! Chat page - full-screen conversation interface

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use web_sys::{ScrollBehavior, ScrollIntoViewOptions};

use crate::chat::{delete_conversation, ChatSession};
use crate::components::{
    CharacterSelector, ChatInput, ChatMessage, ModelSelector, Sidebar, TypingIndicator,
};
use crate::dialog;
use crate::generation::Generation;
use crate::state::AppState;
use crate::storage;

#[component]
pub fn ChatPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let config = state.config();
    let session_id = storage::session_id(state.client().store(), &config);
    tracing::debug!("Chat session {}", session_id);

    let session = RwSignal::new(ChatSession::new(session_id, &config));
    let input = RwSignal::new(String::new());
    let sidebar_open = RwSignal::new(false);
    let messages_end_ref = NodeRef::<leptos::html::Div>::new();

    // `mounted` goes stale on unmount; `selection` also on every conversation switch
    let mounted = StoredValue::new(Generation::new());
    let mount_ticket = mounted.with_value(Generation::next);
    let selection = StoredValue::new(Generation::new());
    on_cleanup(move || {
        mounted.with_value(Generation::invalidate);
        selection.with_value(Generation::invalidate);
    });

    let refresh_conversations = move || {
        let alive = mounted.get_value();
        let session_id = session.with_untracked(|s| s.session_id().to_string());
        spawn_local(async move {
            let result = state.client().list_conversations(&session_id).await;
            if !alive.is_current(mount_ticket) {
                return;
            }
            match result {
                Ok(list) => session.update(|s| s.set_conversations(list)),
                Err(e) => tracing::warn!("Failed to load conversations: {}", e),
            }
        });
    };

    // Characters, models and the conversation list on mount
    {
        let alive = mounted.get_value();
        spawn_local(async move {
            let client = state.client();
            let characters = client.list_characters().await;
            let models = client.list_models().await;
            if !alive.is_current(mount_ticket) {
                return;
            }
            match characters {
                Ok(list) => session.update(|s| s.set_characters(list)),
                Err(e) => tracing::warn!("Failed to load characters: {}", e),
            }
            match models {
                Ok(list) => session.update(|s| s.set_models(list)),
                Err(e) => tracing::warn!("Failed to load models: {}", e),
            }
        });
    }
    refresh_conversations();

    // Keep the newest message in view
    Effect::new(move |_| {
        session.with(|s| (s.messages().len(), s.is_in_flight()));
        if let Some(el) = messages_end_ref.get() {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            el.scroll_into_view_with_scroll_into_view_options(&options);
        }
    });

    let send = Callback::new(move |_: ()| {
        let text = input.get_untracked();
        let Some(pending) = session.try_update(|s| s.begin_send(&text)).flatten() else {
            return;
        };
        input.set(String::new());

        let alive = mounted.get_value();
        spawn_local(async move {
            let result = state.client().send_chat(&pending.request).await;
            if !alive.is_current(mount_ticket) {
                return;
            }
            let outcome = session.try_update(|s| s.complete_send(&pending, result));
            if outcome.is_some_and(|o| o.refresh_conversations) {
                refresh_conversations();
            }
        });
    });

    let select = Callback::new(move |id: u64| {
        if session.with_untracked(|s| s.is_selected(id)) {
            return;
        }
        let current = selection.get_value();
        let ticket = current.next();
        spawn_local(async move {
            let result = state.client().get_conversation(id).await;
            if !current.is_current(ticket) {
                return;
            }
            match result {
                Ok(detail) => session.update(|s| s.show_conversation(detail)),
                Err(e) => {
                    tracing::warn!("Failed to load conversation {}: {}", id, e);
                    session.update(|s| s.set_error(e.to_string()));
                }
            }
        });
    });

    let new_chat = Callback::new(move |_: ()| {
        selection.with_value(Generation::invalidate);
        session.update(|s| s.start_new());
    });

    let delete = Callback::new(move |id: u64| {
        let alive = mounted.get_value();
        spawn_local(async move {
            let Some(result) = delete_conversation(&state.client(), id, dialog::confirm).await
            else {
                return;
            };
            if !alive.is_current(mount_ticket) {
                return;
            }
            match result {
                Ok(_) => {
                    if session.with_untracked(|s| s.is_selected(id)) {
                        selection.with_value(Generation::invalidate);
                    }
                    session.update(|s| s.remove_conversation(id));
                }
                Err(e) => {
                    tracing::warn!("Failed to delete conversation {}: {}", id, e);
                    session.update(|s| s.set_error(e.to_string()));
                }
            }
        });
    });

    let rename = Callback::new(move |_: ()| {
        let Some((id, title)) = session.try_update(|s| s.finish_rename()).flatten() else {
            return;
        };
        let alive = mounted.get_value();
        spawn_local(async move {
            let result = state.client().rename_conversation(id, &title).await;
            if !alive.is_current(mount_ticket) {
                return;
            }
            match result {
                Ok(_) => session.update(|s| s.apply_rename(id, &title)),
                Err(e) => {
                    tracing::warn!("Failed to rename conversation {}: {}", id, e);
                    session.update(|s| s.set_error(e.to_string()));
                }
            }
        });
    });

    let assistant_name = Signal::derive(move || session.with(|s| s.assistant_name()));
    let is_sending = Signal::derive(move || session.with(|s| s.is_in_flight()));
    let has_messages = Memo::new(move |_| session.with(|s| !s.messages().is_empty()));

    view! {
        <Title text="AI Chat" />
        <div class="chat-page h-screen flex overflow-hidden">
            <Sidebar
                session=session
                is_open=sidebar_open
                on_new=new_chat
                on_select=select
                on_delete=delete
                on_rename=rename
            />

            <div class="flex-1 flex flex-col min-w-0">
                // Header
                <header class="chat-header flex items-center gap-3 px-4 h-16 border-b border-[var(--border-default)]">
                    <button
                        class="lg:hidden btn btn-ghost p-2"
                        aria-label="Toggle conversations"
                        on:click=move |_| sidebar_open.update(|v| *v = !*v)
                    >
                        "☰"
                    </button>
                    <div class="flex-1 min-w-0">
                        <div class="font-semibold truncate">{move || session.with(|s| s.header_title())}</div>
                        <div class="text-xs text-[var(--text-muted)] truncate">{move || assistant_name.get()}</div>
                    </div>
                    <CharacterSelector session=session />
                    <ModelSelector session=session />
                </header>

                // Error banner
                {move || session.with(|s| s.error().map(str::to_string)).map(|message| view! {
                    <div class="error-banner flex items-center justify-between gap-3 px-4 py-2 text-sm">
                        <span>{message}</span>
                        <button class="btn btn-ghost p-1" on:click=move |_| session.update(|s| s.clear_error())>
                            "✕"
                        </button>
                    </div>
                })}

                // Messages
                <div class="flex-1 overflow-y-auto px-4 py-6">
                    <div class="max-w-3xl mx-auto space-y-6">
                        <Show when=move || has_messages.get() fallback=move || view! { <Welcome session=session /> }>
                            <For
                                each=move || session.with(|s| s.messages().iter().cloned().enumerate().collect::<Vec<_>>())
                                key=|(i, m)| (*i, m.timestamp)
                                children=move |(_, message)| view! {
                                    <ChatMessage message=message assistant_name=assistant_name />
                                }
                            />
                        </Show>
                        <Show when=move || is_sending.get()>
                            <TypingIndicator />
                        </Show>
                        <div node_ref=messages_end_ref></div>
                    </div>
                </div>

                <div class="max-w-3xl w-full mx-auto">
                    <ChatInput value=input on_submit=send disabled=is_sending />
                </div>
            </div>
        </div>
    }
}

/// Greeting shown before the first message
#[component]
fn Welcome(session: RwSignal<ChatSession>) -> impl IntoView {
    let character = Memo::new(move |_| session.with(|s| s.selected_character().cloned()));

    view! {
        <div class="welcome text-center py-16 animate-fade-in">
            <div class="text-5xl mb-6">"🤖"</div>
            {move || match character.get() {
                Some(c) => view! {
                    <h2 class="text-2xl font-semibold mb-3">{c.name.clone()}</h2>
                    <p class="text-[var(--text-secondary)] mb-4 whitespace-pre-wrap">{c.greeting()}</p>
                    <p class="text-sm text-[var(--text-muted)]">{c.description.clone()}</p>
                }
                .into_any(),
                None => view! {
                    <h2 class="text-2xl font-semibold mb-3">"Start a conversation"</h2>
                    <p class="text-[var(--text-muted)]">"Ask anything to get going."</p>
                }
                .into_any(),
            }}
        </div>
    }
}
