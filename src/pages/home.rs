//! Home page: hero, skills, latest articles and featured projects

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::generation::Generation;
use crate::pages::articles::ArticleCard;
use crate::pages::projects::ProjectCard;
use crate::state::AppState;
use crate::typewriter::use_typewriter;
use crate::types::{Article, Project};

/// Phrases cycled by the hero typewriter
pub const ROLE_PHRASES: [&str; 4] = [
    "Full-stack developer",
    "Rust enthusiast",
    "Open-source contributor",
    "Lifelong learner",
];

pub const TYPE_SPEED: Duration = Duration::from_millis(120);
pub const TYPE_PAUSE: Duration = Duration::from_millis(2500);

/// Skill groups shown under the hero
const SKILLS: [(&str, &[&str]); 4] = [
    ("Backend", &["Go", "Python", "Node.js", "Java"]),
    ("Frontend", &["React", "TypeScript", "Vue", "Next.js"]),
    ("DevOps", &["Docker", "Kubernetes", "AWS", "CI/CD"]),
    ("Databases", &["MySQL", "PostgreSQL", "Redis", "MongoDB"]),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let role = use_typewriter(&ROLE_PHRASES, TYPE_SPEED, TYPE_PAUSE);

    let articles = RwSignal::new(Vec::<Article>::new());
    let projects = RwSignal::new(Vec::<Project>::new());
    let generation = Generation::new();
    let ticket = generation.next();
    {
        let generation = generation.clone();
        on_cleanup(move || generation.invalidate());
    }

    let home_articles = state.config().home_articles;
    {
        let generation = generation.clone();
        spawn_local(async move {
            let result = state.client().list_articles(1, home_articles).await;
            if !generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(page) => articles.set(page.articles),
                Err(e) => tracing::warn!("Failed to load latest articles: {}", e),
            }
        });
    }
    spawn_local(async move {
        let result = state.client().featured_projects().await;
        if !generation.is_current(ticket) {
            return;
        }
        match result {
            Ok(list) => projects.set(list),
            Err(e) => tracing::warn!("Failed to load featured projects: {}", e),
        }
    });

    view! {
        <Title text="Home" />
        <div class="max-w-6xl mx-auto px-8">
            // Hero
            <section class="hero py-24 text-center">
                <h1 class="text-5xl font-bold mb-6 animate-fade-in-up">"Hi, welcome to my corner of the web"</h1>
                <p class="text-2xl text-[var(--text-secondary)] h-10">
                    <span>{move || role.get()}</span>
                    <span class="typing-cursor">"|"</span>
                </p>
                <div class="flex justify-center gap-4 mt-10">
                    <a href="/articles" class="btn btn-primary">"Read the blog"</a>
                    <a href="/chat" class="btn btn-ghost">"Talk to the AI"</a>
                </div>
            </section>

            // Skills
            <section class="py-12">
                <h2 class="section-title">"Skills"</h2>
                <div class="grid md:grid-cols-4 gap-6">
                    {SKILLS
                        .iter()
                        .map(|(group, items)| view! {
                            <div class="card p-6">
                                <h3 class="font-semibold mb-3">{*group}</h3>
                                <div class="flex flex-wrap gap-2">
                                    {items
                                        .iter()
                                        .map(|s| view! { <span class="tag">{*s}</span> })
                                        .collect::<Vec<_>>()}
                                </div>
                            </div>
                        })
                        .collect::<Vec<_>>()}
                </div>
            </section>

            // Latest articles
            <section class="py-12">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="section-title">"Latest articles"</h2>
                    <a href="/articles" class="nav-link">"All articles →"</a>
                </div>
                <Show
                    when=move || !articles.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-[var(--text-muted)]">"No articles yet"</p> }
                >
                    <div class="grid md:grid-cols-3 gap-6">
                        <For
                            each=move || articles.get()
                            key=|a| a.id
                            children=|article| view! { <ArticleCard article=article /> }
                        />
                    </div>
                </Show>
            </section>

            // Featured projects
            <section class="py-12">
                <div class="flex items-center justify-between mb-6">
                    <h2 class="section-title">"Featured projects"</h2>
                    <a href="/projects" class="nav-link">"All projects →"</a>
                </div>
                <Show
                    when=move || !projects.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-[var(--text-muted)]">"No projects yet"</p> }
                >
                    <div class="grid md:grid-cols-2 gap-6">
                        <For
                            each=move || projects.get()
                            key=|p| p.id
                            children=|project| view! { <ProjectCard project=project /> }
                        />
                    </div>
                </Show>
            </section>
        </div>
    }
}
