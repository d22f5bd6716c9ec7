//! Character and model pickers for the chat header

use leptos::prelude::*;

use crate::chat::ChatSession;

/// Persona dropdown; hidden unless there is more than one character
#[component]
pub fn CharacterSelector(session: RwSignal<ChatSession>) -> impl IntoView {
    let visible = Memo::new(move |_| session.with(|s| s.show_character_selector()));

    let on_change = move |ev: web_sys::Event| {
        if let Ok(id) = event_target_value(&ev).parse::<u64>() {
            session.update(|s| s.select_character(id));
        }
    };

    view! {
        <Show when=move || visible.get()>
            <label class="selector flex items-center gap-2 text-sm">
                <span class="text-zinc-400">"Character:"</span>
                <select class="select" on:change=on_change>
                    {move || {
                        session.with(|s| {
                            let selected = s.selected_character().map(|c| c.id);
                            s.characters()
                                .iter()
                                .map(|c| {
                                    let is_selected = selected == Some(c.id);
                                    view! {
                                        <option value=c.id.to_string() selected=is_selected>
                                            {c.name.clone()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                    }}
                </select>
            </label>
        </Show>
    }
}

/// Model dropdown; hidden unless there is more than one model
#[component]
pub fn ModelSelector(session: RwSignal<ChatSession>) -> impl IntoView {
    let visible = Memo::new(move |_| session.with(|s| s.show_model_selector()));

    let on_change = move |ev: web_sys::Event| {
        let name = event_target_value(&ev);
        session.update(|s| s.select_model(&name));
    };

    view! {
        <Show when=move || visible.get()>
            <label class="selector flex items-center gap-2 text-sm">
                <span class="text-zinc-400">"Model:"</span>
                <select class="select" on:change=on_change>
                    {move || {
                        session.with(|s| {
                            let selected = s.selected_model().map(|m| m.name.clone());
                            s.models()
                                .iter()
                                .map(|m| {
                                    let is_selected = selected.as_deref() == Some(m.name.as_str());
                                    view! {
                                        <option value=m.name.clone() selected=is_selected>
                                            {m.label().to_string()}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                    }}
                </select>
            </label>
        </Show>
    }
}
