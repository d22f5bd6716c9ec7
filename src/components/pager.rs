//! Page bar under paginated lists

use leptos::prelude::*;

use crate::pagination::Pagination;

/// Prev / page numbers / next. Renders nothing for a single page.
#[component]
pub fn Pager(
    #[prop(into)] pagination: Signal<Pagination>,
    on_page: Callback<u32>,
) -> impl IntoView {
    view! {
        <Show when=move || pagination.get().show_controls()>
            <nav class="pager flex items-center justify-center gap-2 mt-10">
                <button
                    class="btn btn-ghost"
                    disabled=move || !pagination.get().has_prev()
                    on:click=move |_| on_page.run(pagination.get().page.saturating_sub(1).max(1))
                >
                    "← Prev"
                </button>
                {move || {
                    let p = pagination.get();
                    p.page_numbers()
                        .into_iter()
                        .map(|n| {
                            let class = if n == p.page { "btn btn-primary" } else { "btn btn-ghost" };
                            view! {
                                <button class=class on:click=move |_| on_page.run(n)>
                                    {n}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <button
                    class="btn btn-ghost"
                    disabled=move || !pagination.get().has_next()
                    on:click=move |_| on_page.run(pagination.get().page + 1)
                >
                    "Next →"
                </button>
            </nav>
        </Show>
    }
}
