// ── Runtime connection settings ──
//
// These types describe where dispatched requests go. They carry host and
// scheme data only and never touch disk -- the embedding application
// builds a `Settings` value and hands it in.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};

/// Server half of the settings: where dispatched requests are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// `true` selects the `https` scheme.
    pub secure: bool,
    /// Path prefix every request endpoint is resolved under.
    pub root: String,
}

impl ServerSettings {
    /// The scheme/authority/root prefix requests are resolved against,
    /// e.g. `http://localhost:3000/api`.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}{}", self.host, self.port, self.root)
    }
}

/// Client half of the settings: where the embedding UI is served from.
/// Carried for observers; dispatch never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub host: String,
    pub port: u16,
    pub secure: bool,
}

/// Full runtime settings. The server half is read on every dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub client: ClientSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "localhost".into(),
                port: 3000,
                secure: false,
                root: "/api".into(),
            },
            client: ClientSettings {
                host: "localhost".into(),
                port: 8080,
                secure: false,
            },
        }
    }
}

/// Shared, lock-free cell holding the live settings.
///
/// Starts empty: dispatch fails with `ConfigMissing` until the embedding
/// application installs settings via [`set`](Self::set).
#[derive(Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<ArcSwapOption<Settings>>,
}

impl SettingsHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the live settings.
    pub fn set(&self, settings: Settings) {
        self.inner.store(Some(Arc::new(settings)));
    }

    pub fn get(&self) -> Option<Arc<Settings>> {
        self.inner.load_full()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Drop the live settings; subsequent dispatches fail until
    /// [`set`](Self::set) runs again.
    pub fn clear(&self) {
        self.inner.store(None);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_reflects_scheme_and_root() {
        let mut server = Settings::default().server;
        assert_eq!(server.base_url(), "http://localhost:3000/api");

        server.secure = true;
        server.host = "api.example.com".into();
        server.port = 443;
        assert_eq!(server.base_url(), "https://api.example.com:443/api");
    }

    #[test]
    fn handle_starts_unconfigured() {
        let handle = SettingsHandle::new();
        assert!(!handle.is_configured());
        assert!(handle.get().is_none());

        handle.set(Settings::default());
        assert!(handle.is_configured());
        assert_eq!(handle.get().unwrap().server.port, 3000);

        handle.clear();
        assert!(!handle.is_configured());
    }

    #[test]
    fn clones_share_the_same_cell() {
        let handle = SettingsHandle::new();
        let other = handle.clone();
        handle.set(Settings::default());
        assert!(other.is_configured());
    }
}
