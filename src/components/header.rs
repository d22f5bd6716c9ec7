//! Site navigation bar

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::AppState;

/// Navigation entries shared by the desktop bar, the mobile menu and the chat
/// page's drawer
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/articles", "Articles"),
    ("/projects", "Projects"),
    ("/chat", "AI Chat"),
];

/// Whether `href` should be highlighted for the current `path`
pub fn is_active(path: &str, href: &str) -> bool {
    path == href
}

/// Main application header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let pathname = use_location().pathname;
    let menu_open = RwSignal::new(false);

    // Close the mobile menu whenever the route changes
    Effect::new(move |_| {
        pathname.track();
        menu_open.set(false);
    });

    let link_class = move |href: &'static str, base: &'static str| {
        move || {
            if is_active(&pathname.get(), href) {
                format!("{} active", base)
            } else {
                base.to_string()
            }
        }
    };

    view! {
        <header class="navbar fixed top-0 inset-x-0 z-50">
            <div class="navbar-content max-w-6xl mx-auto h-16 px-8 flex items-center justify-between">
                // Logo
                <a href="/" class="logo flex items-center gap-3">
                    <span class="logo-mark">"F"</span>
                    <span class="logo-text">"Folio"</span>
                </a>

                // Desktop navigation
                <nav class="nav-links hidden md:flex gap-1">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <a href=*href class=link_class(*href, "nav-link")>
                                    {*label}
                                </a>
                            }
                        })
                        .collect::<Vec<_>>()}
                    <Show when=move || state.is_authenticated()>
                        <a href="/admin" class=link_class("/admin", "nav-link")>"Admin"</a>
                    </Show>
                </nav>

                // Mobile menu toggle
                <button
                    class="md:hidden btn btn-ghost p-2"
                    on:click=move |_| menu_open.update(|v| *v = !*v)
                    aria-label="Toggle menu"
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>

            // Mobile menu
            <Show when=move || menu_open.get()>
                <nav class="mobile-menu md:hidden flex flex-col px-8 pb-4 gap-1">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <a href=*href class=link_class(*href, "mobile-nav-link")>
                                    {*label}
                                </a>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
            </Show>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_link_is_exact_match() {
        assert!(is_active("/", "/"));
        assert!(is_active("/articles", "/articles"));
        assert!(!is_active("/articles/3", "/articles"));
        assert!(!is_active("/articles", "/"));
    }
}
