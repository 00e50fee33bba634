// src/app.rs
use std::sync::Arc;

use crate::backend::{AuthEvents, Backend};
use crate::db::Database;

/// Shared by every worker thread.
#[derive(Clone)]
pub struct App {
    pub db: Database,
    pub backend: Arc<dyn Backend>,
    pub events: AuthEvents,
    /// Public origin, no trailing slash. Sign-up confirmation links point here.
    pub site_url: String,
}

impl App {
    pub fn new(db: Database, backend: Arc<dyn Backend>, events: AuthEvents, site_url: &str) -> Self {
        Self {
            db,
            backend,
            events,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    /// Cookies get `Secure` when the site is served over TLS.
    pub fn secure_cookies(&self) -> bool {
        self.site_url.starts_with("https://")
    }

    pub fn sign_up_redirect(&self) -> String {
        format!("{}/", self.site_url)
    }
}
