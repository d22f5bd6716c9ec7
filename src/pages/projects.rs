//! Project showcase page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::components::{EmptyState, LoadingBlock};
use crate::generation::Generation;
use crate::state::AppState;
use crate::types::Project;

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let projects = RwSignal::new(Vec::<Project>::new());
    let loading = RwSignal::new(true);

    let generation = Generation::new();
    let ticket = generation.next();
    {
        let generation = generation.clone();
        on_cleanup(move || generation.invalidate());
    }

    spawn_local(async move {
        let result = state.client().list_projects().await;
        if !generation.is_current(ticket) {
            return;
        }
        match result {
            Ok(list) => projects.set(list),
            Err(e) => tracing::warn!("Failed to load projects: {}", e),
        }
        loading.set(false);
    });

    view! {
        <Title text="Projects" />
        <div class="max-w-6xl mx-auto px-8 py-12">
            <h1 class="text-4xl font-bold mb-10">"Projects"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingBlock /> }>
                <Show
                    when=move || !projects.with(Vec::is_empty)
                    fallback=|| view! { <EmptyState message="No projects yet" /> }
                >
                    <div class="grid md:grid-cols-2 gap-6">
                        <For
                            each=move || projects.get()
                            key=|p| p.id
                            children=|project| view! { <ProjectCard project=project /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

/// Card with badge, links and technology tags
#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let github = (!project.github_url.is_empty()).then_some(project.github_url);
    let demo = (!project.demo_url.is_empty()).then_some(project.demo_url);

    view! {
        <div class="card p-6 flex flex-col">
            <div class="flex items-center gap-3 mb-3">
                <h3 class="text-xl font-semibold">{project.name}</h3>
                {project.featured.then(|| view! { <span class="badge">"Featured"</span> })}
            </div>
            <p class="text-[var(--text-secondary)] mb-4 flex-1">{project.description}</p>
            <div class="flex flex-wrap gap-2 mb-4">
                {project
                    .technologies
                    .into_iter()
                    .map(|t| view! { <span class="tag">{t}</span> })
                    .collect::<Vec<_>>()}
            </div>
            <div class="flex gap-4 text-sm">
                {github.map(|url| view! {
                    <a href=url target="_blank" rel="noopener noreferrer" class="nav-link">"GitHub"</a>
                })}
                {demo.map(|url| view! {
                    <a href=url target="_blank" rel="noopener noreferrer" class="nav-link">"Live demo"</a>
                })}
            </div>
        </div>
    }
}
