//! UI Components

mod chat_input;
mod chat_message;
mod editor;
pub mod header;
mod layout;
mod loading;
mod pager;
mod selectors;
mod sidebar;

pub use chat_input::ChatInput;
pub use chat_message::ChatMessage;
pub use editor::{ArticleEditor, ProjectEditor};
pub use header::Header;
pub use layout::{BackToTop, Footer, Layout};
pub use loading::{EmptyState, LoadingBlock, LoadingDots, LoadingSpinner, TypingIndicator};
pub use pager::Pager;
pub use selectors::{CharacterSelector, ModelSelector};
pub use sidebar::Sidebar;
