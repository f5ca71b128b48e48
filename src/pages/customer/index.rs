use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{AppState, Response, ResponseResult};

use super::{CustomerForm, MeasurementsInput};

#[derive(Deserialize, Default)]
struct CustomerQuery {
    #[serde(default)]
    search: String,
}

pub async fn query_customers(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let query: CustomerQuery = serde_json::from_value(value)?;
    let customers: Vec<_> = state
        .backend
        .customers(session.token())
        .await?
        .into_iter()
        .filter(|c| c.matches(&query.search))
        .collect();
    Ok(Response::ok(json!(customers)))
}

pub async fn view_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let (customer, orders) = tokio::try_join!(
        state.backend.customer(session.token(), &id),
        state.backend.customer_orders(session.token(), &id)
    )?;
    Ok(Response::ok(json!({
        "customer": customer,
        "orders": orders
    })))
}

pub async fn add_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let form: CustomerForm = serde_json::from_value(value)?;
    let form = form.normalized()?;
    let customer = state.backend.add_customer(session.token(), &form).await?;
    tracing::info!(customer = %customer.id, "customer added");
    Ok(Response::ok(json!({
        "message": "Customer added successfully",
        "customer": customer
    })))
}

pub async fn edit_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let form: CustomerForm = serde_json::from_value(value)?;
    let form = form.normalized()?;
    state
        .backend
        .update_customer(session.token(), &id, &form)
        .await?;
    Ok(Response::done("Customer updated successfully"))
}

pub async fn delete_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    state.backend.delete_customer(session.token(), &id).await?;
    tracing::info!(customer = %id, "customer deleted");
    Ok(Response::done("Customer deleted successfully"))
}

pub async fn update_measurements(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let input: MeasurementsInput = serde_json::from_value(value)?;
    let measurements = input.validate()?;
    state
        .backend
        .update_measurements(session.token(), &id, &measurements)
        .await?;
    Ok(Response::ok(json!({
        "message": "Measurements updated successfully",
        "measurements": measurements
    })))
}
