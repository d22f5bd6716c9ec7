//! Mock seams for testing the API client.
//!
//! `MockTransport` answers from a queue of canned responses and records every
//! request it was asked to send; `RecordingNavigator` pretends to be on a
//! fixed path and remembers redirects. Both share state between clones so a
//! test can keep a handle after giving one to the client.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use folio_ui::api::{ApiClient, HttpRequest, HttpResponse, Navigator, Transport};
use folio_ui::config::ClientConfig;
use folio_ui::error::{ApiError, Result};
use folio_ui::storage::MemoryStore;
use serde_json::Value;

/// Mock transport with queued responses.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    timeouts: Arc<Mutex<Vec<Duration>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body
    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            status_text: status_text(status).to_string(),
            body: body.to_string(),
        }))
    }

    /// Queue a response with a raw body
    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse {
            status,
            status_text: status_text(status).to_string(),
            body: body.to_string(),
        }))
    }

    /// Queue a transport-level failure
    pub fn fail(&self, err: ApiError) -> &Self {
        self.push(Err(err))
    }

    fn push(&self, response: Result<HttpResponse>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    /// Body of the last request, parsed as JSON
    pub fn last_body(&self) -> Value {
        let body = self.last_request().body.expect("last request had no body");
        serde_json::from_str(&body).expect("last request body is not JSON")
    }

    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.timeouts.lock().unwrap().push(timeout);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

/// Navigator stuck on one path that records redirects.
#[derive(Clone)]
pub struct RecordingNavigator {
    path: Arc<Mutex<String>>,
    redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: Arc::new(Mutex::new(path.to_string())),
            redirects: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.lock().unwrap().push(path.to_string());
    }
}

/// Client wired to mocks, plus handles for inspecting them
pub struct Harness {
    pub client: ApiClient<MockTransport, MemoryStore, RecordingNavigator>,
    pub transport: MockTransport,
    pub store: MemoryStore,
    pub navigator: RecordingNavigator,
}

impl Harness {
    /// Fresh client on `path` with an empty store
    pub fn at(path: &str) -> Self {
        Self::with_store(path, MemoryStore::new())
    }

    pub fn with_store(path: &str, store: MemoryStore) -> Self {
        let transport = MockTransport::new();
        let navigator = RecordingNavigator::at(path);
        let client = ApiClient::new(
            ClientConfig::default(),
            transport.clone(),
            store.clone(),
            navigator.clone(),
        );
        Self {
            client,
            transport,
            store,
            navigator,
        }
    }

    /// Client that already holds `token`
    pub fn logged_in(path: &str, token: &str) -> Self {
        let config = ClientConfig::default();
        Self::with_store(path, MemoryStore::with(&config.token_key, token))
    }
}
