//! Create/edit modals for the admin console

use leptos::prelude::*;

use crate::admin::{join_list, parse_list, Draft};
use crate::types::{ArticleInput, ProjectInput};

/// Modal frame shared by both editors
#[component]
fn Modal(
    title: String,
    on_close: Callback<()>,
    on_save: Callback<()>,
    #[prop(into)] can_save: Signal<bool>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/60 backdrop-blur-sm animate-fade-in">
            <div class="modal card w-full max-w-2xl max-h-[90vh] overflow-y-auto p-6">
                <h2 class="text-xl font-semibold mb-6">{title}</h2>
                <div class="space-y-4">{children()}</div>
                <div class="flex justify-end gap-3 mt-6">
                    <button class="btn btn-ghost" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button
                        class="btn btn-primary"
                        disabled=move || !can_save.get()
                        on:click=move |_| on_save.run(())
                    >
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Article form; mount only while the draft is open
#[component]
pub fn ArticleEditor(
    draft: RwSignal<Draft<ArticleInput>>,
    on_save: Callback<()>,
) -> impl IntoView {
    let title = if draft.with_untracked(|d| d.is_new()) { "New article" } else { "Edit article" };
    let tags_text = RwSignal::new(
        draft.with_untracked(|d| d.fields().map(|f| join_list(&f.tags)).unwrap_or_default()),
    );
    let field = move |get: fn(&ArticleInput) -> String| {
        move || draft.with(|d| d.fields().map(get).unwrap_or_default())
    };
    let can_save = Signal::derive(move || draft.with(|d| d.save_action().is_some()));

    view! {
        <Modal
            title=title.to_string()
            on_close=Callback::new(move |_: ()| draft.set(Draft::NoEdit))
            on_save=on_save
            can_save=can_save
        >
            <label class="block">
                <span class="label">"Title *"</span>
                <input
                    class="input w-full"
                    prop:value=field(|f| f.title.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.title = v));
                    }
                />
            </label>
            <label class="block">
                <span class="label">"Summary"</span>
                <input
                    class="input w-full"
                    prop:value=field(|f| f.summary.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.summary = v));
                    }
                />
            </label>
            <label class="block">
                <span class="label">"Content"</span>
                <textarea
                    class="input w-full h-64 font-mono text-sm"
                    prop:value=field(|f| f.content.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.content = v));
                    }
                ></textarea>
            </label>
            <label class="block">
                <span class="label">"Tags (comma separated)"</span>
                <input
                    class="input w-full"
                    prop:value=move || tags_text.get()
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        let tags = parse_list(&v);
                        tags_text.set(v);
                        draft.update(|d| d.edit(|f| f.tags = tags));
                    }
                />
            </label>
            <label class="flex items-center gap-2">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.fields().is_some_and(|f| f.is_published))
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        draft.update(|d| d.edit(|f| f.is_published = checked));
                    }
                />
                <span>"Published"</span>
            </label>
        </Modal>
    }
}

/// Project form; mount only while the draft is open
#[component]
pub fn ProjectEditor(
    draft: RwSignal<Draft<ProjectInput>>,
    on_save: Callback<()>,
) -> impl IntoView {
    let title = if draft.with_untracked(|d| d.is_new()) { "New project" } else { "Edit project" };
    let tech_text = RwSignal::new(
        draft.with_untracked(|d| d.fields().map(|f| join_list(&f.technologies)).unwrap_or_default()),
    );
    let field = move |get: fn(&ProjectInput) -> String| {
        move || draft.with(|d| d.fields().map(get).unwrap_or_default())
    };
    let can_save = Signal::derive(move || draft.with(|d| d.save_action().is_some()));

    view! {
        <Modal
            title=title.to_string()
            on_close=Callback::new(move |_: ()| draft.set(Draft::NoEdit))
            on_save=on_save
            can_save=can_save
        >
            <label class="block">
                <span class="label">"Name *"</span>
                <input
                    class="input w-full"
                    prop:value=field(|f| f.name.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.name = v));
                    }
                />
            </label>
            <label class="block">
                <span class="label">"Description"</span>
                <textarea
                    class="input w-full h-32"
                    prop:value=field(|f| f.description.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.description = v));
                    }
                ></textarea>
            </label>
            <label class="block">
                <span class="label">"GitHub URL"</span>
                <input
                    class="input w-full"
                    prop:value=field(|f| f.github_url.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.github_url = v));
                    }
                />
            </label>
            <label class="block">
                <span class="label">"Demo URL"</span>
                <input
                    class="input w-full"
                    prop:value=field(|f| f.demo_url.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        draft.update(|d| d.edit(|f| f.demo_url = v));
                    }
                />
            </label>
            <label class="block">
                <span class="label">"Technologies (comma separated)"</span>
                <input
                    class="input w-full"
                    prop:value=move || tech_text.get()
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        let technologies = parse_list(&v);
                        tech_text.set(v);
                        draft.update(|d| d.edit(|f| f.technologies = technologies));
                    }
                />
            </label>
            <label class="flex items-center gap-2">
                <input
                    type="checkbox"
                    prop:checked=move || draft.with(|d| d.fields().is_some_and(|f| f.featured))
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        draft.update(|d| d.edit(|f| f.featured = checked));
                    }
                />
                <span>"Featured"</span>
            </label>
        </Modal>
    }
}
