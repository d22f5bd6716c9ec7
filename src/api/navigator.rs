//! Where-am-I / go-there seam used by the 401 handling

/// Browser location access
pub trait Navigator: Clone + 'static {
    /// Path of the current view, e.g. `/chat`
    fn current_path(&self) -> String;

    /// Hard navigation to `path`
    fn redirect(&self, path: &str);
}

/// `window.location`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if window.location().set_href(path).is_err() {
            tracing::error!("Failed to navigate to {}", path);
        }
    }
}
