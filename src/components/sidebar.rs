//! Conversation list sidebar for the chat page

use leptos::prelude::*;

use crate::chat::ChatSession;
use crate::components::header::NAV_LINKS;
use crate::types::Conversation;

/// Sidebar with the session's conversations and the site links
#[component]
pub fn Sidebar(
    session: RwSignal<ChatSession>,
    /// Whether sidebar is open (mobile)
    is_open: RwSignal<bool>,
    on_new: Callback<()>,
    on_select: Callback<u64>,
    on_delete: Callback<u64>,
    /// Called when a rename is committed (blur or Enter)
    on_rename: Callback<()>,
) -> impl IntoView {
    let conversations = Memo::new(move |_| session.with(|s| s.conversations().to_vec()));

    view! {
        // Overlay for mobile
        <Show when=move || is_open.get()>
            <div
                class="fixed inset-0 bg-black/60 backdrop-blur-sm z-30 lg:hidden animate-fade-in"
                on:click=move |_| is_open.set(false)
            ></div>
        </Show>

        <aside class=move || format!(
            "sidebar fixed lg:relative inset-y-0 left-0 z-40 w-72
             flex flex-col transform transition-transform duration-300 lg:translate-x-0 {}",
            if is_open.get() { "translate-x-0" } else { "-translate-x-full" }
        )>
            <div class="p-4 border-b border-[var(--border-default)]">
                <button
                    on:click=move |_| {
                        on_new.run(());
                        is_open.set(false);
                    }
                    class="btn btn-primary w-full"
                >
                    <svg xmlns="http://www.w3.org/2000/svg" class="w-5 h-5" viewBox="0 0 20 20" fill="currentColor">
                        <path fill-rule="evenodd" d="M10 3a1 1 0 011 1v5h5a1 1 0 110 2h-5v5a1 1 0 11-2 0v-5H4a1 1 0 110-2h5V4a1 1 0 011-1z" clip-rule="evenodd" />
                    </svg>
                    "New Chat"
                </button>
            </div>

            <div class="flex-1 overflow-y-auto p-4">
                <h3 class="text-xs font-semibold text-[var(--text-muted)] uppercase tracking-wider mb-3 px-2">
                    "Conversations"
                </h3>
                {move || {
                    let list = conversations.get();
                    if list.is_empty() {
                        view! {
                            <p class="text-sm text-[var(--text-muted)] italic px-2">"No conversations yet"</p>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="space-y-1">
                                {list
                                    .into_iter()
                                    .map(|conv| view! {
                                        <ConversationItem
                                            conversation=conv
                                            session=session
                                            is_open=is_open
                                            on_select=on_select
                                            on_delete=on_delete
                                            on_rename=on_rename
                                        />
                                    })
                                    .collect::<Vec<_>>()}
                            </div>
                        }
                        .into_any()
                    }
                }}
            </div>

            <nav class="p-4 border-t border-[var(--border-default)] flex flex-wrap gap-2 text-sm">
                {NAV_LINKS
                    .iter()
                    .map(|(href, label)| view! {
                        <a href=*href class="nav-link">{*label}</a>
                    })
                    .collect::<Vec<_>>()}
            </nav>
        </aside>
    }
}

/// One row: title button, or an inline editor while renaming
#[component]
fn ConversationItem(
    conversation: Conversation,
    session: RwSignal<ChatSession>,
    is_open: RwSignal<bool>,
    on_select: Callback<u64>,
    on_delete: Callback<u64>,
    on_rename: Callback<()>,
) -> impl IntoView {
    let id = conversation.id;
    let title = conversation.title;
    let is_selected = Memo::new(move |_| session.with(|s| s.is_selected(id)));
    let is_renaming = Memo::new(move |_| session.with(|s| s.renaming() == Some(id)));

    view! {
        <Show
            when=move || is_renaming.get()
            fallback=move || {
                let title = title.clone();
                view! {
                    <div class=move || format!(
                        "sidebar-item group relative w-full flex items-center gap-2 {}",
                        if is_selected.get() { "sidebar-item-active" } else { "" }
                    )>
                        <button
                            class="flex-1 min-w-0 text-left text-sm truncate"
                            on:click=move |_| {
                                on_select.run(id);
                                is_open.set(false);
                            }
                        >
                            {title}
                        </button>
                        <button
                            class="btn btn-ghost p-1 text-xs opacity-60 hover:opacity-100"
                            title="Rename"
                            on:click=move |_| session.update(|s| s.begin_rename(id))
                        >
                            "✎"
                        </button>
                        <button
                            class="btn btn-ghost p-1 text-xs opacity-60 hover:opacity-100"
                            title="Delete"
                            on:click=move |_| on_delete.run(id)
                        >
                            "🗑"
                        </button>
                    </div>
                }
            }
        >
            <input
                class="input w-full text-sm"
                autofocus=true
                prop:value=move || session.with(|s| s.rename_draft())
                on:input=move |ev| {
                    let draft = event_target_value(&ev);
                    session.update(|s| s.set_rename_draft(draft));
                }
                on:blur=move |_| on_rename.run(())
                on:keydown=move |ev: web_sys::KeyboardEvent| match ev.key().as_str() {
                    "Enter" => {
                        ev.prevent_default();
                        on_rename.run(());
                    }
                    "Escape" => session.update(|s| s.cancel_rename()),
                    _ => {}
                }
            />
        </Show>
    }
}
