mod wizard;

use axum::{extract::State, http::HeaderMap, routing::get, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

pub use wizard::{PlaceOrder, WizardStep};

use crate::{
    libs::dser::deser_opt_f64,
    pages::{
        customer::{CustomerForm, MeasurementsInput},
        order::NewLineItem,
    },
    session::SessionHandle,
    do_if, AdminResult, AppState, Response, ResponseResult,
};

pub fn place_order_router() -> Router<AppState> {
    Router::new()
        .route("/placeorder", get(current))
        .route("/placeorder/customer", post(customer_step))
        .route("/placeorder/items", post(items_step))
        .route("/placeorder/measurements", post(measurements_step))
        .route("/placeorder/back", post(back))
        .route("/placeorder/submit", post(submit))
        .route("/placeorder/reset", post(reset))
}

fn reply(wizard: &PlaceOrder) -> Response {
    Response::ok(json!({
        "wizard": wizard,
        "total": wizard.total(),
        "measurementsRequired": wizard.measurements_required(),
    }))
}

/// Stores the draft whatever the outcome, so a failed step keeps what was
/// entered.
fn finish(
    state: &AppState,
    session: &SessionHandle,
    wizard: PlaceOrder,
    outcome: AdminResult<()>,
) -> ResponseResult {
    let reply = reply(&wizard);
    state.sessions.save_wizard(session, wizard);
    outcome?;
    Ok(reply)
}

async fn current(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    Ok(reply(&state.sessions.wizard(&session)))
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum CustomerChoice {
    /// Id of a stored customer
    Existing(String),
    New(CustomerForm),
}

async fn choose_customer(
    state: &AppState,
    session: &SessionHandle,
    wizard: &mut PlaceOrder,
    choice: CustomerChoice,
) -> AdminResult<()> {
    wizard.expect(WizardStep::Customer)?;
    let customer = match choice {
        CustomerChoice::Existing(id) => state.backend.customer(session.token(), &id).await?,
        CustomerChoice::New(form) => {
            wizard.remember_customer_form(form.clone());
            let form = form.normalized()?;
            let customer = state.backend.add_customer(session.token(), &form).await?;
            tracing::info!(customer = %customer.id, "customer added while placing order");
            customer
        }
    };
    wizard.choose_customer(customer);
    Ok(())
}

async fn customer_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let choice: CustomerChoice = serde_json::from_value(value)?;
    let mut wizard = state.sessions.wizard(&session);
    let outcome = choose_customer(&state, &session, &mut wizard, choice).await;
    finish(&state, &session, wizard, outcome)
}

#[derive(Deserialize)]
struct ItemsBody {
    #[serde(default)]
    products: Vec<NewLineItem>,
}

async fn choose_items(
    state: &AppState,
    session: &SessionHandle,
    wizard: &mut PlaceOrder,
    products: Vec<NewLineItem>,
) -> AdminResult<()> {
    wizard.expect(WizardStep::Items)?;
    let catalog = state.backend.items(session.token()).await?;
    wizard.set_products(products, &catalog)
}

async fn items_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let ItemsBody { products } = serde_json::from_value(value)?;
    let mut wizard = state.sessions.wizard(&session);
    let outcome = choose_items(&state, &session, &mut wizard, products).await;
    finish(&state, &session, wizard, outcome)
}

async fn take_measurements(
    state: &AppState,
    session: &SessionHandle,
    wizard: &mut PlaceOrder,
    input: Option<MeasurementsInput>,
) -> AdminResult<()> {
    wizard.expect(WizardStep::Measurements)?;
    let saved = wizard.set_measurements(input)?;
    if let (Some(measurements), Some(customer)) = (saved.as_ref(), wizard.customer()) {
        state
            .backend
            .update_measurements(session.token(), &customer.id, measurements)
            .await?;
    }
    wizard.measurements_done(saved);
    Ok(())
}

/// The body is the measurement form, or `null` to skip when a measurement
/// document is on file.
async fn measurements_step(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let input: Option<MeasurementsInput> = serde_json::from_value(value)?;
    let mut wizard = state.sessions.wizard(&session);
    let outcome = take_measurements(&state, &session, &mut wizard, input).await;
    finish(&state, &session, wizard, outcome)
}

async fn back(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let mut wizard = state.sessions.wizard(&session);
    let outcome = wizard.back().map(|_| ());
    finish(&state, &session, wizard, outcome)
}

#[derive(Deserialize, Default)]
struct SubmitBody {
    #[serde(default, deserialize_with = "deser_opt_f64")]
    total: Option<f64>,
}

async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let body: SubmitBody = do_if!(value.is_null() => SubmitBody::default(), serde_json::from_value(value)?);
    let mut wizard = state.sessions.wizard(&session);
    let outcome = wizard.set_total(body.total);
    state.sessions.save_wizard(&session, wizard.clone());
    outcome?;
    let order = wizard.order()?;
    state.backend.place_order(session.token(), &order).await?;
    state.sessions.reset_wizard(&session);
    tracing::info!(
        customer = %order.customer,
        total = order.total,
        items = order.products.len(),
        "order placed"
    );
    Ok(Response::ok(json!({
        "message": "Order Placed Successfully!",
        "navigate": "/orders"
    })))
}

async fn reset(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    state.sessions.reset_wizard(&session);
    Ok(reply(&PlaceOrder::default()))
}
