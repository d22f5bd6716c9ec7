//! API client for communicating with the blog backend
//!
//! One wrapper, four verbs, JSON in and out. Every call:
//! - attaches `Authorization: Bearer <token>` when a token is stored,
//! - is sent once with the configured timeout (no retry, no queue),
//! - turns any failure into a single [`ApiError`] with a displayable message.
//!
//! A 401 also clears the stored token and, unless the user is on the chat
//! page, sends them to the admin login.

mod endpoints;
pub mod navigator;
pub mod transport;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::storage::{KeyValueStore, LocalStore, TokenStore};

pub use navigator::{BrowserNavigator, Navigator};
pub use transport::{FetchTransport, HttpRequest, HttpResponse, Method, Transport};

/// Client used by the pages in the browser
pub type WebClient = ApiClient<FetchTransport, LocalStore, BrowserNavigator>;

#[derive(Debug, Clone)]
pub struct ApiClient<T, S, N> {
    config: Arc<ClientConfig>,
    transport: T,
    store: S,
    tokens: TokenStore<S>,
    navigator: N,
}

impl WebClient {
    /// Browser client over `fetch`, `localStorage` and `window.location`
    pub fn browser(config: ClientConfig) -> Self {
        Self::new(config, FetchTransport, LocalStore, BrowserNavigator)
    }
}

impl<T: Transport, S: KeyValueStore, N: Navigator> ApiClient<T, S, N> {
    pub fn new(config: ClientConfig, transport: T, store: S, navigator: N) -> Self {
        let tokens = TokenStore::new(store.clone(), &config);
        Self {
            config: Arc::new(config),
            transport,
            store,
            tokens,
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// Underlying key-value store, shared with the chat session
    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.request(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let body = encode(body)?;
        self.request(Method::Post, path, Some(body)).await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let body = encode(body)?;
        self.request(Method::Put, path, Some(body)).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.request(Method::Delete, path, None).await
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<R> {
        let url = self.config.url(path);
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.tokens.get() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        tracing::debug!("{} {}", method.as_str(), url);

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        let response = match self.transport.send(request, self.config.timeout).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} {} failed: {}", method.as_str(), path, e);
                return Err(e);
            }
        };

        if !response.ok() {
            let err = ApiError::from_response(response.status, &response.status_text, &response.body);
            tracing::warn!("{} {} -> {}: {}", method.as_str(), path, response.status, err);
            if err.is_unauthorized() {
                self.handle_unauthorized();
            }
            return Err(err);
        }

        decode(&response.body)
    }

    fn handle_unauthorized(&self) {
        self.tokens.clear();

        let current = self.navigator.current_path();
        if current.contains("/chat") {
            tracing::info!("Session expired while chatting, staying on {}", current);
            return;
        }
        tracing::info!("Session expired, redirecting to {}", self.config.login_path);
        self.navigator.redirect(&self.config.login_path);
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(body: &str) -> Result<R> {
    // Some endpoints answer 2xx with an empty body
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
