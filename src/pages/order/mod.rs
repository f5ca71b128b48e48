mod data;
mod query;
mod status;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

pub use data::{CustomerRef, NewLineItem, NewOrder, Order, OrderStatus, Product, SelectedOption};
pub use query::{OrderQuery, ORDERS_PER_PAGE};

use crate::{AdminError, AppState, Response, ResponseResult};

pub fn order_router() -> Router<AppState> {
    Router::new()
        .route("/order/query", post(query_orders))
        .route("/order/details/:id", get(order_details))
        .route("/order/advance/:id", post(advance_order))
        .route("/order/retreat/:id", post(retreat_order))
        .route("/order/paid/:id", post(toggle_paid))
        .route("/order/assign", post(assign_employees))
}

async fn query_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let query: OrderQuery = serde_json::from_value(value)?;
    let orders = state.backend.orders(session.token()).await?;
    Ok(Response::ok(json!(query.apply(&orders))))
}

async fn order_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let token = session.token();
    let order = state.backend.order(token, &id).await?;
    let (customer, products, employees) = tokio::try_join!(
        state.backend.customer(token, order.customer.id()),
        state.backend.products(token),
        state.backend.employees(token)
    )?;
    let products: Vec<Product> = products
        .into_iter()
        .filter(|p| order.products.iter().any(|o| o.id == p.id))
        .collect();
    Ok(Response::ok(json!({
        "order": order,
        "customer": customer,
        "products": products,
        "employees": employees,
    })))
}

/// Applies `change` to the stored order and persists the new status.
async fn transition(
    state: &AppState,
    headers: &HeaderMap,
    id: &str,
    change: fn(&mut Order) -> crate::AdminResult<OrderStatus>,
) -> ResponseResult {
    let session = state.sessions.require(headers)?;
    let mut order = state.backend.order(session.token(), id).await?;
    let from = order.status;
    let to = change(&mut order)?;
    state
        .backend
        .update_order_status(session.token(), id, to)
        .await?;
    tracing::info!(order = %id, %from, %to, "order status updated");
    Ok(Response::ok(json!({
        "message": "Order status updated successfully",
        "order": order
    })))
}

async fn advance_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    transition(&state, &headers, &id, Order::advance).await
}

async fn retreat_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    transition(&state, &headers, &id, Order::retreat).await
}

async fn toggle_paid(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let mut order = state.backend.order(session.token(), &id).await?;
    let paid = order.toggle_paid();
    state
        .backend
        .update_order_payment(session.token(), &id, paid)
        .await?;
    tracing::info!(order = %id, paid, "order payment updated");
    Ok(Response::ok(json!({
        "message": "Payment status updated successfully",
        "order": order
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Assignment {
    product_id: String,
    #[serde(default)]
    employee_ids: Vec<String>,
}

async fn assign_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let assignment: Assignment = serde_json::from_value(value)?;
    if assignment.employee_ids.is_empty() {
        return Err(AdminError::validation("Please select at least one employee").into());
    }
    state
        .backend
        .assign_employees(session.token(), &assignment.product_id, &assignment.employee_ids)
        .await?;
    Ok(Response::done("Employees assigned successfully"))
}
