//! Global application state

use leptos::prelude::*;

use crate::admin::AuthState;
use crate::api::WebClient;
use crate::config::ClientConfig;

/// Shared by every page through context. `Copy`, so handlers and reactive
/// closures can capture it freely.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The one API client
    client: StoredValue<WebClient>,
    /// Admin login status, seeded from the stored token
    pub auth: RwSignal<AuthState>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let client = WebClient::browser(config);
        let auth = AuthState::from_token(client.tokens().get().as_deref());

        Self {
            client: StoredValue::new(client),
            auth: RwSignal::new(auth),
        }
    }

    pub fn client(&self) -> WebClient {
        self.client.get_value()
    }

    pub fn config(&self) -> ClientConfig {
        self.client.with_value(|c| c.config().clone())
    }

    /// Re-read the stored token, e.g. after a 401 cleared it
    pub fn refresh_auth(&self) {
        let auth = self
            .client
            .with_value(|c| AuthState::from_token(c.tokens().get().as_deref()));
        self.auth.set(auth);
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.get().is_logged_in()
    }

    pub fn logout(&self) {
        self.client.with_value(|c| c.logout());
        self.auth.set(AuthState::LoggedOut);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClientConfig::from_env())
    }
}
