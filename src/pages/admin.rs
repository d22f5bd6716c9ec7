//! Admin console: login, article and project management

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::admin::{reload_lists, run_mutation, AdminTab, Draft, Lists, Mutation, MutationOutcome};
use crate::components::{ArticleEditor, LoadingSpinner, ProjectEditor};
use crate::dialog;
use crate::error::ApiError;
use crate::generation::Generation;
use crate::pages::articles::format_date;
use crate::state::AppState;
use crate::types::{Article, ArticleInput, Project, ProjectInput};

#[component]
pub fn AdminPage() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <Title text="Admin" />
        <Show when=move || state.is_authenticated() fallback=|| view! { <LoginForm /> }>
            <Console />
        </Show>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let state = expect_context::<AppState>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let is_loading = RwSignal::new(false);
    let error = RwSignal::new(Option::<String>::None);

    let mounted = StoredValue::new(Generation::new());
    let mount_ticket = mounted.with_value(Generation::next);
    on_cleanup(move || mounted.with_value(Generation::invalidate));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let username_val = username.get_untracked();
        let password_val = password.get_untracked();

        is_loading.set(true);
        error.set(None);
        let alive = mounted.get_value();
        spawn_local(async move {
            let result = state.client().login(&username_val, &password_val).await;
            if !alive.is_current(mount_ticket) {
                return;
            }
            is_loading.set(false);
            match result {
                Ok(_) => state.refresh_auth(),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="auth-container flex items-center justify-center py-24 px-4">
            <div class="auth-card card w-full max-w-md p-8">
                <h1 class="text-2xl font-bold mb-2">"Admin sign in"</h1>
                <p class="text-[var(--text-muted)] mb-8">"Manage articles and projects"</p>
                <form class="space-y-4" on:submit=on_submit>
                    <label class="block">
                        <span class="label">"Username"</span>
                        <input
                            class="input w-full"
                            required=true
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="block">
                        <span class="label">"Password"</span>
                        <input
                            class="input w-full"
                            type="password"
                            required=true
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button type="submit" class="btn btn-primary w-full" disabled=move || is_loading.get()>
                        <Show when=move || is_loading.get() fallback=|| "Sign in">
                            <LoadingSpinner size="w-4 h-4" />
                        </Show>
                    </button>
                    {move || error.get().map(|e| view! {
                        <p class="text-sm text-red-400">{e}</p>
                    })}
                </form>
            </div>
        </div>
    }
}

#[component]
fn Console() -> impl IntoView {
    let state = expect_context::<AppState>();
    let admin_page_size = state.config().admin_page_size;

    let tab = RwSignal::new(AdminTab::default());
    let articles = RwSignal::new(Vec::<Article>::new());
    let projects = RwSignal::new(Vec::<Project>::new());
    let article_draft = RwSignal::new(Draft::<ArticleInput>::NoEdit);
    let project_draft = RwSignal::new(Draft::<ProjectInput>::NoEdit);

    // `mounted` goes stale on unmount; `listing` also when a newer reload starts
    let mounted = StoredValue::new(Generation::new());
    let mount_ticket = mounted.with_value(Generation::next);
    let listing = StoredValue::new(Generation::new());
    on_cleanup(move || {
        mounted.with_value(Generation::invalidate);
        listing.with_value(Generation::invalidate);
    });

    // A rejected token drops us back to the login form
    let on_error = move |e: &ApiError| {
        if e.is_unauthorized() {
            state.refresh_auth();
        }
    };

    let show_lists = move |lists: Lists| {
        match lists.articles {
            Ok(list) => articles.set(list),
            Err(e) => {
                tracing::warn!("Loading articles failed: {}", e);
                on_error(&e);
            }
        }
        match lists.projects {
            Ok(list) => projects.set(list),
            Err(e) => {
                tracing::warn!("Loading projects failed: {}", e);
                on_error(&e);
            }
        }
    };

    {
        let current = listing.get_value();
        let ticket = current.next();
        spawn_local(async move {
            let lists = reload_lists(&state.client(), admin_page_size).await;
            if current.is_current(ticket) {
                show_lists(lists);
            }
        });
    }

    let mutate = move |mutation: Mutation| {
        let alive = mounted.get_value();
        let current = listing.get_value();
        spawn_local(async move {
            let saves_article = matches!(mutation, Mutation::SaveArticle(_));
            let saves_project = matches!(mutation, Mutation::SaveProject(_));
            let outcome =
                run_mutation(&state.client(), mutation, admin_page_size, dialog::confirm).await;
            if !alive.is_current(mount_ticket) {
                return;
            }
            if saves_article {
                article_draft.update(|d| outcome.settle(d));
            }
            if saves_project {
                project_draft.update(|d| outcome.settle(d));
            }
            if let Some(message) = outcome.alert_message() {
                dialog::alert(&message);
            }
            match outcome {
                MutationOutcome::Applied(lists) => {
                    // Drop any reload that started before this change landed
                    current.next();
                    show_lists(lists);
                }
                MutationOutcome::Failed { error, .. } => on_error(&error),
                MutationOutcome::Declined => {}
            }
        });
    };

    let save_article = Callback::new(move |_: ()| {
        if let Some(action) = article_draft.with_untracked(|d| d.save_action()) {
            mutate(Mutation::SaveArticle(action));
        }
    });

    let save_project = Callback::new(move |_: ()| {
        if let Some(action) = project_draft.with_untracked(|d| d.save_action()) {
            mutate(Mutation::SaveProject(action));
        }
    });

    let delete_article = move |id: u64| mutate(Mutation::DeleteArticle(id));
    let delete_project = move |id: u64| mutate(Mutation::DeleteProject(id));

    let tab_class = move |t: AdminTab| {
        move || {
            if tab.get() == t {
                "btn btn-primary"
            } else {
                "btn btn-ghost"
            }
        }
    };

    view! {
        <div class="max-w-6xl mx-auto px-8 py-12">
            <div class="flex items-center justify-between mb-8">
                <h1 class="text-3xl font-bold">"Admin"</h1>
                <button class="btn btn-ghost" on:click=move |_| state.logout()>"Sign out"</button>
            </div>

            <div class="flex gap-2 mb-6">
                <button class=tab_class(AdminTab::Articles) on:click=move |_| tab.set(AdminTab::Articles)>
                    "Articles"
                </button>
                <button class=tab_class(AdminTab::Projects) on:click=move |_| tab.set(AdminTab::Projects)>
                    "Projects"
                </button>
            </div>

            <Show
                when=move || tab.get() == AdminTab::Articles
                fallback=move || view! {
                    <div class="flex justify-end mb-4">
                        <button class="btn btn-primary" on:click=move |_| project_draft.set(Draft::new_blank())>
                            "+ New project"
                        </button>
                    </div>
                    <table class="table w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Technologies"</th>
                                <th>"Featured"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || projects.get()
                                key=|p| (p.id, p.updated_at)
                                children=move |project| {
                                    let id = project.id;
                                    let draft = Draft::for_project(&project);
                                    view! {
                                        <tr>
                                            <td>{project.name}</td>
                                            <td>{project.technologies.join(", ")}</td>
                                            <td>{if project.featured { "★" } else { "" }}</td>
                                            <td class="text-right space-x-2">
                                                <button
                                                    class="btn btn-ghost text-sm"
                                                    on:click=move |_| project_draft.set(draft.clone())
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    class="btn btn-danger text-sm"
                                                    on:click=move |_| delete_project(id)
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }
            >
                <div class="flex justify-end mb-4">
                    <button class="btn btn-primary" on:click=move |_| article_draft.set(Draft::new_blank())>
                        "+ New article"
                    </button>
                </div>
                <table class="table w-full">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"Status"</th>
                            <th>"Views"</th>
                            <th>"Created"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || articles.get()
                            key=|a| (a.id, a.updated_at)
                            children=move |article| {
                                let id = article.id;
                                let draft = Draft::for_article(&article);
                                view! {
                                    <tr>
                                        <td>{article.title}</td>
                                        <td>{if article.is_published { "Published" } else { "Draft" }}</td>
                                        <td>{article.view_count}</td>
                                        <td>{format_date(&article.created_at)}</td>
                                        <td class="text-right space-x-2">
                                            <button
                                                class="btn btn-ghost text-sm"
                                                on:click=move |_| article_draft.set(draft.clone())
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn btn-danger text-sm"
                                                on:click=move |_| delete_article(id)
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <Show when=move || article_draft.with(Draft::is_open)>
                <ArticleEditor draft=article_draft on_save=save_article />
            </Show>
            <Show when=move || project_draft.with(Draft::is_open)>
                <ProjectEditor draft=project_draft on_save=save_project />
            </Show>
        </div>
    }
}
