//! Loading indicators

use leptos::prelude::*;

/// Animated loading dots
#[component]
pub fn LoadingDots() -> impl IntoView {
    view! {
        <div class="flex items-center gap-1">
            <span class="w-2 h-2 bg-indigo-400 rounded-full dot-bounce-1"></span>
            <span class="w-2 h-2 bg-indigo-400 rounded-full dot-bounce-2"></span>
            <span class="w-2 h-2 bg-indigo-400 rounded-full dot-bounce-3"></span>
        </div>
    }
}

/// Centered "Loading..." block used while a list is fetched
#[component]
pub fn LoadingBlock(
    #[prop(default = "Loading...")] message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-3 py-16 text-zinc-500">
            <LoadingSpinner />
            <span>{message}</span>
        </div>
    }
}

/// Spinner loading indicator
#[component]
pub fn LoadingSpinner(
    #[prop(default = "w-5 h-5")] size: &'static str,
) -> impl IntoView {
    view! {
        <svg
            class=format!("{} animate-spin text-indigo-500", size)
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <circle
                class="opacity-25"
                cx="12"
                cy="12"
                r="10"
                stroke="currentColor"
                stroke-width="4"
            ></circle>
            <path
                class="opacity-75"
                fill="currentColor"
                d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4zm2 5.291A7.962 7.962 0 014 12H0c0 3.042 1.135 5.824 3 7.938l3-2.647z"
            ></path>
        </svg>
    }
}

/// Typing indicator shown while the assistant is answering
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="flex items-start gap-3 message-appear">
            <div class="px-4 py-3 bg-zinc-800 rounded-2xl rounded-tl-sm">
                <LoadingDots />
            </div>
        </div>
    }
}

/// Empty-state placeholder
#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="text-center text-zinc-600 py-16">{message}</div>
    }
}
