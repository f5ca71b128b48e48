pub mod backend;
pub mod config;
pub mod error;
pub mod libs;
pub mod pages;
pub mod response;
pub mod session;
pub mod token;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::Method, Router};
use tower_http::cors::{Any, CorsLayer};

pub use backend::Backend;
pub use config::Config;
pub use error::{AdminError, AdminResult};
pub use libs::{base64_decode, base64_encode};
pub use response::Response;
use session::SessionStore;

pub type ResponseResult = Result<Response, Response>;

/// Shared by every page handler
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, sessions: SessionStore) -> Self {
        Self { backend, sessions }
    }
}

pub fn app(state: AppState) -> Router {
    pages::pages_router()
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers(Any),
        )
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}
