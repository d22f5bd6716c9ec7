//! Page chrome: header, footer and the back-to-top button

use leptos::ev;
use leptos::prelude::*;

use crate::components::Header;
use crate::dialog;

/// Scroll offset after which the back-to-top button appears
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;

/// Wraps every page except the full-screen chat
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col">
            <Header />
            <main class="flex-1 pt-16">{children()}</main>
            <Footer />
            <BackToTop />
        </div>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().format("%Y").to_string();

    view! {
        <footer class="footer border-t border-[var(--border-default)] py-8 mt-16">
            <div class="max-w-6xl mx-auto px-8 flex flex-col md:flex-row items-center justify-between gap-4 text-sm text-[var(--text-muted)]">
                <span>{format!("© {} Folio. All rights reserved.", year)}</span>
                <div class="flex gap-4">
                    <a href="/articles" class="hover:text-[var(--text-primary)]">"Articles"</a>
                    <a href="/projects" class="hover:text-[var(--text-primary)]">"Projects"</a>
                    <a href="/chat" class="hover:text-[var(--text-primary)]">"AI Chat"</a>
                </div>
            </div>
        </footer>
    }
}

/// Floating button shown once the page is scrolled down
#[component]
pub fn BackToTop() -> impl IntoView {
    let visible = RwSignal::new(dialog::scroll_y() > BACK_TO_TOP_THRESHOLD);

    let handle = window_event_listener(ev::scroll, move |_| {
        visible.set(dialog::scroll_y() > BACK_TO_TOP_THRESHOLD);
    });
    on_cleanup(move || handle.remove());

    view! {
        <Show when=move || visible.get()>
            <button
                class="back-to-top fixed bottom-8 right-8 z-40 btn btn-primary rounded-full w-12 h-12 animate-fade-in"
                aria-label="Back to top"
                on:click=move |_| dialog::scroll_to_top()
            >
                "↑"
            </button>
        </Show>
    }
}
