// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Settings the HTTP adapter needs beyond the application services.
#[derive(Clone, Debug)]
pub struct HttpSettings {
    pub max_upload_bytes: u64,
    pub allowed_origins: Vec<String>,
    /// Server URLs listed in the OpenAPI document.
    pub public_api_urls: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            allowed_origins: vec!["http://localhost:3000".into()],
            public_api_urls: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: HttpSettings,
}
