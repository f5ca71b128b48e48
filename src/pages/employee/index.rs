use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    libs::dser::deser_f64, pages::order::OrderStatus, AdminError, AppState, Response,
    ResponseResult,
};

use super::EmployeeForm;

#[derive(Deserialize)]
struct EmployeeQuery {
    #[serde(default)]
    search: String,
    #[serde(default = "all_roles")]
    role: String,
}

fn all_roles() -> String {
    "All".to_owned()
}

pub async fn query_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let query: EmployeeQuery = serde_json::from_value(value)?;
    let employees: Vec<_> = state
        .backend
        .employees(session.token())
        .await?
        .into_iter()
        .filter(|e| e.matches(&query.search, &query.role))
        .collect();
    Ok(Response::ok(json!(employees)))
}

pub async fn view_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let (employee, products) = tokio::try_join!(
        state.backend.employee(session.token(), &id),
        state.backend.products(session.token())
    )?;
    let products: Vec<_> = products
        .into_iter()
        .filter(|p| employee.is_assigned(p))
        .collect();
    let completed = products
        .iter()
        .filter(|p| p.status == OrderStatus::Completed)
        .count();
    Ok(Response::ok(json!({
        "employee": employee,
        "completed": completed,
        "pending": products.len() - completed,
        "products": products,
    })))
}

pub async fn add_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let form: EmployeeForm = serde_json::from_value(value)?;
    let form = form.for_create()?;
    state.backend.add_employee(session.token(), &form).await?;
    tracing::info!(name = %form.name, role = %form.role, "employee added");
    Ok(Response::done("Employee added successfully"))
}

pub async fn edit_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let form: EmployeeForm = serde_json::from_value(value)?;
    let form = form.for_update()?;
    state
        .backend
        .edit_employee(session.token(), &id, &form)
        .await?;
    Ok(Response::done("Employee updated successfully"))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    state.backend.delete_employee(session.token(), &id).await?;
    tracing::info!(employee = %id, "employee deleted");
    Ok(Response::done("Employee deleted successfully"))
}

#[derive(Deserialize)]
struct Payment {
    #[serde(default, deserialize_with = "deser_f64")]
    payment: f64,
}

pub async fn make_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let Payment { payment } = serde_json::from_value(value)?;
    if payment <= 0.0 || !payment.is_finite() {
        return Err(AdminError::validation("Amount must be greater than zero").into());
    }
    state
        .backend
        .pay_employee(session.token(), &id, payment)
        .await?;
    tracing::info!(employee = %id, amount = payment, "employee paid");
    Ok(Response::done("Payment successful"))
}
