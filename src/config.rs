//! Client configuration
//!
//! Everything the UI needs to know about its backend and local storage lives
//! here and is handed to the API layer and the chat module explicitly. Values
//! can be overridden at build time with `FOLIO_API_BASE` and
//! `FOLIO_TIMEOUT_SECS`.

use std::time::Duration;

/// Default REST base path
pub const DEFAULT_API_BASE: &str = "/api/v1";
/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Storage key for the admin bearer token
pub const STORAGE_KEY_TOKEN: &str = "token";
/// Storage key for the anonymous chat session identifier
pub const STORAGE_KEY_SESSION: &str = "chat_session_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base path every request is relative to
    pub api_base: String,
    /// Fixed timeout applied to every request
    pub timeout: Duration,
    /// Local storage key holding the bearer token
    pub token_key: String,
    /// Local storage key holding the chat session identifier
    pub session_key: String,
    /// Model auto-selected on the chat page when the backend offers it
    pub preferred_model: String,
    /// Characters of the first message kept in a new conversation's title
    pub title_max_chars: usize,
    /// Articles per page on the article list
    pub articles_page_size: u32,
    /// Articles shown on the home page
    pub home_articles: u32,
    /// Articles loaded into the admin table
    pub admin_page_size: u32,
    /// Path the user is sent to when the backend answers 401
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_key: STORAGE_KEY_TOKEN.to_string(),
            session_key: STORAGE_KEY_SESSION.to_string(),
            preferred_model: "deepseek".to_string(),
            title_max_chars: 30,
            articles_page_size: 10,
            home_articles: 3,
            admin_page_size: 100,
            login_path: "/admin".to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults with build-time overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(base) = option_env!("FOLIO_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(secs) = option_env!("FOLIO_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid FOLIO_TIMEOUT_SECS: {}", secs),
            }
        }

        config
    }

    /// Join a path onto the base, e.g. `"/articles"` -> `"/api/v1/articles"`
    pub fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}
