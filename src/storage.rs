//! Browser key-value persistence
//!
//! Two plain-string keys are kept: the admin token and the chat session
//! identifier. Both are read through [`KeyValueStore`] so the API client and
//! the chat page get their storage injected instead of reaching for globals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gloo_storage::{LocalStorage, Storage};

use crate::config::ClientConfig;

/// Minimal string store
pub trait KeyValueStore: Clone + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`, storing raw strings (no JSON quoting) so values stay
/// readable by anything else sharing the origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            tracing::warn!("Failed to persist {} to local storage", key);
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// In-memory store, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.remove(key);
        }
    }
}

/// Admin bearer token persisted under the configured key
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S, config: &ClientConfig) -> Self {
        Self {
            store,
            key: config.token_key.clone(),
        }
    }

    /// Stored token; an empty string counts as absent
    pub fn get(&self) -> Option<String> {
        self.store.get(&self.key).filter(|t| !t.is_empty())
    }

    pub fn set(&self, token: &str) {
        self.store.set(&self.key, token);
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Return the stored chat session identifier, generating and persisting one
/// on first use.
///
/// A stored non-empty value is never replaced, which keeps the browser's
/// conversations grouped across reloads.
pub fn session_id<S: KeyValueStore>(store: &S, config: &ClientConfig) -> String {
    if let Some(existing) = store.get(&config.session_key).filter(|s| !s.is_empty()) {
        return existing;
    }

    let id = generate_session_id(chrono::Utc::now().timestamp_millis());
    store.set(&config.session_key, &id);
    tracing::debug!("Generated chat session {}", id);
    id
}

/// `session_<millis>_<9 base36 chars>`
pub fn generate_session_id(now_millis: i64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut value = u128::from_le_bytes(*uuid::Uuid::new_v4().as_bytes());
    let mut suffix = String::with_capacity(9);
    for _ in 0..9 {
        suffix.push(ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }

    format!("session_{}_{}", now_millis, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_state_between_clones() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.set("a", "1");
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a");
        assert!(clone.get("a").is_none());
    }

    #[test]
    fn test_token_store_roundtrip() {
        let config = ClientConfig::default();
        let tokens = TokenStore::new(MemoryStore::new(), &config);
        assert!(!tokens.is_present());

        tokens.set("abc");
        assert_eq!(tokens.get().as_deref(), Some("abc"));

        tokens.clear();
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let config = ClientConfig::default();
        let tokens = TokenStore::new(MemoryStore::with("token", ""), &config);
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_session_id_generated_once() {
        let config = ClientConfig::default();
        let store = MemoryStore::new();

        let first = session_id(&store, &config);
        assert!(first.starts_with("session_"));
        assert_eq!(store.get("chat_session_id").as_deref(), Some(first.as_str()));
        assert_eq!(store.len(), 1);

        let second = session_id(&store, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_session_id_is_kept() {
        let config = ClientConfig::default();
        let store = MemoryStore::with("chat_session_id", "session_1_legacy");
        assert_eq!(session_id(&store, &config), "session_1_legacy");
    }

    #[test]
    fn test_generated_session_id_shape() {
        let id = generate_session_id(1_700_000_000_000);
        let parts: Vec<_> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert_eq!(parts[1], "1700000000000");
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generated_session_ids_differ() {
        assert_ne!(generate_session_id(1), generate_session_id(1));
    }
}
