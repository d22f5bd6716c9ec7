//! Single article page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

use crate::components::LoadingBlock;
use crate::generation::Generation;
use crate::pages::articles::format_date;
use crate::state::AppState;
use crate::types::Article;

/// Split article text into paragraphs on blank lines; each paragraph keeps its
/// single line breaks as separate lines.
pub fn paragraphs(content: &str) -> Vec<Vec<String>> {
    let mut out = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
enum Load {
    Loading,
    Loaded(Article),
    Failed(String),
}

#[component]
pub fn ArticleDetailPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let params = use_params_map();
    let load = RwSignal::new(Load::Loading);

    let generation = Generation::new();
    {
        let generation = generation.clone();
        on_cleanup(move || generation.invalidate());
    }

    Effect::new(move |_| {
        let id = params.with(|p| p.get("id").and_then(|id| id.parse::<u64>().ok()));
        let ticket = generation.next();
        let generation = generation.clone();

        let Some(id) = id else {
            load.set(Load::Failed("Article not found".to_string()));
            return;
        };
        load.set(Load::Loading);

        spawn_local(async move {
            let result = state.client().get_article(id).await;
            if !generation.is_current(ticket) {
                return;
            }
            match result {
                Ok(article) => load.set(Load::Loaded(article)),
                Err(e) => {
                    tracing::warn!("Failed to load article {}: {}", id, e);
                    load.set(Load::Failed(e.to_string()));
                }
            }
        });
    });

    view! {
        <div class="max-w-3xl mx-auto px-8 py-12">
            {move || match load.get() {
                Load::Loading => view! { <LoadingBlock /> }.into_any(),
                Load::Failed(message) => view! {
                    <Title text="Article" />
                    <div class="text-center py-16">
                        <p class="text-red-400 mb-6">{message}</p>
                        <a href="/articles" class="btn btn-ghost">"← Back to articles"</a>
                    </div>
                }
                .into_any(),
                Load::Loaded(article) => view! { <ArticleView article=article /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ArticleView(article: Article) -> impl IntoView {
    let updated = article.was_updated().then(|| format_date(&article.updated_at));
    let body = paragraphs(&article.content);

    view! {
        <Title text=article.title.clone() />
        <article>
            <a href="/articles" class="nav-link text-sm">"← Back to articles"</a>
            <h1 class="text-4xl font-bold mt-6 mb-4">{article.title}</h1>
            <div class="flex flex-wrap items-center gap-4 text-sm text-[var(--text-muted)] mb-6">
                <span>{format!("Published {}", format_date(&article.created_at))}</span>
                {updated.map(|date| view! { <span>{format!("Updated {}", date)}</span> })}
                <span>{format!("{} views", article.view_count)}</span>
            </div>
            <div class="flex flex-wrap gap-2 mb-10">
                {article
                    .tags
                    .into_iter()
                    .map(|tag| view! { <span class="tag">{tag}</span> })
                    .collect::<Vec<_>>()}
            </div>
            <div class="prose">
                {body
                    .into_iter()
                    .map(|lines| {
                        let last = lines.len().saturating_sub(1);
                        view! {
                            <p class="mb-4 leading-relaxed">
                                {lines
                                    .into_iter()
                                    .enumerate()
                                    .map(|(i, line)| view! {
                                        {line}
                                        {(i < last).then(|| view! { <br /> })}
                                    })
                                    .collect::<Vec<_>>()}
                            </p>
                        }
                    })
                    .collect::<Vec<_>>()}
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "first line\nsecond line\n\n\nnext para\n   \nlast";
        assert_eq!(
            paragraphs(text),
            vec![
                vec!["first line".to_string(), "second line".to_string()],
                vec!["next para".to_string()],
                vec!["last".to_string()],
            ]
        );
    }

    #[test]
    fn test_paragraphs_empty() {
        assert!(paragraphs("").is_empty());
        assert!(paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn test_markup_is_kept_as_text() {
        let out = paragraphs("<script>alert(1)</script>");
        assert_eq!(out[0][0], "<script>alert(1)</script>");
    }
}
