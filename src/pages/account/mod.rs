use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use serde_json::json;

mod login;

use crate::{AppState, Response, ResponseResult};

pub fn account_router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login::admin_login))
        .route("/admin/logout", post(admin_logout))
        .route("/admin/session", get(current_session))
}

/// Always succeeds; the session and its draft order are dropped if present.
async fn admin_logout(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    if state.sessions.teardown(&headers) {
        tracing::info!("admin logged out");
    }
    Ok(Response::done("Logged out"))
}

async fn current_session(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    Ok(Response::ok(json!(session.session())))
}
