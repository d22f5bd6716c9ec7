//! Article list page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use crate::components::{EmptyState, LoadingBlock, Pager};
use crate::dialog;
use crate::generation::Generation;
use crate::pagination::Pagination;
use crate::state::AppState;
use crate::types::Article;

/// `YYYY-MM-DD` in the reader's timezone
pub fn format_date(at: &chrono::DateTime<chrono::Utc>) -> String {
    at.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string()
}

#[component]
pub fn ArticlesPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let page_size = state.config().articles_page_size;

    let page = RwSignal::new(1u32);
    let articles = RwSignal::new(Vec::<Article>::new());
    let total = RwSignal::new(0u64);
    let loading = RwSignal::new(true);

    let generation = Generation::new();
    {
        let generation = generation.clone();
        on_cleanup(move || generation.invalidate());
    }

    Effect::new(move |_| {
        let current = page.get();
        let ticket = generation.next();
        let generation = generation.clone();
        loading.set(true);

        spawn_local(async move {
            let result = state.client().list_articles(current, page_size).await;
            if !generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(resp) => {
                    total.set(resp.total);
                    articles.set(resp.articles);
                }
                Err(e) => {
                    tracing::warn!("Failed to load articles page {}: {}", current, e);
                    total.set(0);
                    articles.set(Vec::new());
                }
            }
            loading.set(false);
        });
    });

    let pagination = Signal::derive(move || Pagination::new(page.get(), page_size, total.get()));
    let visible = move || pagination.get().visible(&articles.get()).to_vec();

    let on_page = Callback::new(move |n: u32| {
        page.set(n.max(1));
        dialog::scroll_to_top();
    });

    view! {
        <Title text="Articles" />
        <div class="max-w-4xl mx-auto px-8 py-12">
            <h1 class="text-4xl font-bold mb-10">"Articles"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <LoadingBlock /> }>
                <Show
                    when=move || !articles.with(Vec::is_empty)
                    fallback=|| view! { <EmptyState message="No articles yet" /> }
                >
                    <div class="space-y-6">
                        <For
                            each=visible
                            key=|a| a.id
                            children=|article| view! { <ArticleCard article=article /> }
                        />
                    </div>
                </Show>
                <Pager pagination=pagination on_page=on_page />
            </Show>
        </div>
    }
}

/// Summary card linking to the article
#[component]
pub fn ArticleCard(article: Article) -> impl IntoView {
    let href = format!("/articles/{}", article.id);

    view! {
        <a href=href class="card block p-6 hover:border-[var(--accent)] transition-colors">
            <h3 class="text-xl font-semibold mb-2">{article.title}</h3>
            {(!article.summary.is_empty()).then(|| view! {
                <p class="text-[var(--text-secondary)] mb-4 line-clamp-3">{article.summary}</p>
            })}
            <div class="flex flex-wrap items-center gap-3 text-sm text-[var(--text-muted)]">
                <span>{format_date(&article.created_at)}</span>
                <span>{format!("{} views", article.view_count)}</span>
                {article
                    .tags
                    .into_iter()
                    .map(|tag| view! { <span class="tag">{tag}</span> })
                    .collect::<Vec<_>>()}
            </div>
        </a>
    }
}
