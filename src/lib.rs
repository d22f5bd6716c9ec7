//! Folio UI - Leptos frontend for a personal site
//!
//! A client-rendered single-page app with a blog, a project showcase, an
//! admin console and a full-screen AI chat, all talking to a JSON backend
//! under `/api/v1`.

pub mod admin;
pub mod api;
pub mod chat;
pub mod components;
pub mod config;
pub mod dialog;
pub mod error;
pub mod generation;
pub mod pages;
pub mod pagination;
pub mod state;
pub mod storage;
pub mod typewriter;
pub mod types;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use components::Layout;
use pages::{
    admin::AdminPage, article_detail::ArticleDetailPage, articles::ArticlesPage, chat::ChatPage,
    home::HomePage, projects::ProjectsPage,
};
use state::AppState;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(AppState::default());

    view! {
        <Title formatter=|text: String| format!("{} | Folio", text) />
        <Router>
            <div class="app min-h-screen bg-[var(--bg-primary)] text-[var(--text-primary)]">
                <Routes fallback=|| view! { <Layout><NotFound /></Layout> }>
                    <Route path=path!("/chat") view=ChatPage />
                    <Route path=path!("/") view=|| view! { <Layout><HomePage /></Layout> } />
                    <Route path=path!("/articles") view=|| view! { <Layout><ArticlesPage /></Layout> } />
                    <Route
                        path=path!("/articles/:id")
                        view=|| view! { <Layout><ArticleDetailPage /></Layout> }
                    />
                    <Route path=path!("/projects") view=|| view! { <Layout><ProjectsPage /></Layout> } />
                    <Route path=path!("/admin") view=|| view! { <Layout><AdminPage /></Layout> } />
                </Routes>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <Title text="Not found" />
        <div class="flex items-center justify-center py-32">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-[var(--text-muted)] mb-4">"404"</h1>
                <p class="text-xl text-[var(--text-secondary)] mb-8">"Page not found"</p>
                <a href="/" class="btn btn-primary">"Go Home"</a>
            </div>
        </div>
    }
}
