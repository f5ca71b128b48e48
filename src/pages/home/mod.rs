pub mod aggregate;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::json;

use crate::{AdminError, AppState, Response, ResponseResult};

use aggregate::{build_dashboard, TimeFrame};

pub fn home_router() -> Router<AppState> {
    Router::new()
        .route("/home/dashboard", get(default_dashboard))
        .route("/home/dashboard/:frame", get(dashboard))
}

async fn default_dashboard(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    render(&state, &headers, TimeFrame::default()).await
}

async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(frame): Path<String>,
) -> ResponseResult {
    let frame = TimeFrame::parse(&frame).ok_or_else(|| {
        AdminError::validation(format!("Unknown time frame `{frame}`, expected week, month or year"))
    })?;
    render(&state, &headers, frame).await
}

async fn render(state: &AppState, headers: &HeaderMap, frame: TimeFrame) -> ResponseResult {
    let session = state.sessions.require(headers)?;
    let token = session.token();
    let (orders, products, items) = tokio::try_join!(
        state.backend.orders(token),
        state.backend.products(token),
        state.backend.items(token)
    )?;
    let today = Utc::now().date_naive();
    let dashboard = build_dashboard(&orders, &products, &items, frame, today);
    tracing::debug!(?frame, orders = orders.len(), "dashboard rebuilt");
    Ok(Response::ok(json!(dashboard)))
}
