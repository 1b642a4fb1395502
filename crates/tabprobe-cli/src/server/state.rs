//! Application state for the web server.

use std::sync::Arc;

/// Largest request body accepted by the upload endpoints.
pub const DEFAULT_UPLOAD_LIMIT: usize = 256 * 1024 * 1024;

/// Read-only description of the running service.
#[derive(Debug)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Shared application state. Requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub info: Arc<ServiceInfo>,
    /// Request body limit in bytes for multipart uploads.
    pub upload_limit: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            info: Arc::new(ServiceInfo {
                name: "tabprobe-api",
                version: env!("CARGO_PKG_VERSION"),
            }),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }

    pub fn with_upload_limit(mut self, bytes: usize) -> Self {
        self.upload_limit = bytes;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
