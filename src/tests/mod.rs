use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{
    backend::memory::{MemoryBackend, PASSWORD, USER},
    pages::order::OrderStatus,
    session::SessionStore,
    token::TokenSigner,
    AppState,
};

fn app() -> (Router, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::seeded());
    let sessions = SessionStore::new(TokenSigner::new("router-test", 3600).unwrap());
    (crate::app(AppState::new(backend.clone(), sessions)), backend)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = request
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    call(app, request).await
}

async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(token), Value::Null).await
}

async fn post(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(token), body).await
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/admin/login",
        None,
        json!({"userName": USER, "password": PASSWORD}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["token"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn login_validates_and_opens_a_session() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::POST, "/admin/login", None, json!({"userName": "admin"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "Please enter both username and password");

    let (status, _) = send(
        &app,
        Method::POST,
        "/admin/login",
        None,
        json!({"userName": USER, "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app).await;
    let (status, body) = get(&app, "/admin/session", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Shop Admin");
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn pages_require_a_session() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/item/list", None, Value::Null).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], -1);
    let (status, _) = get(&app, "/item/list", "forged.token.value").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, _) = app();
    let token = login(&app).await;
    let (status, _) = post(&app, "/admin/logout", &token, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/placeorder", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = post(&app, "/admin/logout", &token, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn dashboard_reports_series_and_cards() {
    let (app, _) = app();
    let token = login(&app).await;
    let (status, body) = get(&app, "/home/dashboard/week", &token).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let data = &body["data"];
    assert_eq!(data["totalOrders"], 1);
    assert_eq!(data["totalProducts"], 1);
    assert_eq!(data["revenue"]["labels"].as_array().unwrap().len(), 7);
    assert_eq!(data["revenue"]["values"][6], 1500.0);
    assert_eq!(data["statusDistribution"][0], 100.0);
    assert_eq!(data["productTypes"]["counts"][2], 1);

    let (status, body) = get(&app, "/home/dashboard/year", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revenue"]["values"].as_array().unwrap().len(), 12);

    let (status, _) = get(&app, "/home/dashboard/decade", &token).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn order_transitions_persist_immediately() {
    let (app, backend) = app();
    let token = login(&app).await;

    let (status, body) = post(&app, "/order/advance/o1", &token, Value::Null).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["order"]["status"], "in progress");
    assert_eq!(backend.store().orders[0].status, OrderStatus::InProgress);

    let (status, _) = post(&app, "/order/retreat/o1", &token, Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = post(&app, "/order/retreat/o1", &token, Value::Null).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 8);
    assert_eq!(backend.store().orders[0].status, OrderStatus::Pending);

    let (_, body) = post(&app, "/order/paid/o1", &token, Value::Null).await;
    assert_eq!(body["data"]["order"]["paid"], true);
    assert!(backend.store().orders[0].paid);
    post(&app, "/order/paid/o1", &token, Value::Null).await;
    assert!(!backend.store().orders[0].paid);

    let (status, _) = post(&app, "/order/advance/missing", &token, Value::Null).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_list_filters_and_details() {
    let (app, _) = app();
    let token = login(&app).await;
    let (_, body) = post(&app, "/order/query", &token, json!({"search": "ali"})).await;
    assert_eq!(body["data"]["total"], 1);
    let (_, body) = post(&app, "/order/query", &token, json!({"status": "shipped"})).await;
    assert_eq!(body["data"]["total"], 0);

    let (status, body) = get(&app, "/order/details/o1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["customer"]["_id"], "c1");
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 1);

    let (status, _) = post(&app, "/order/assign", &token, json!({"productId": "p1", "employeeIds": []})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = post(&app, "/order/assign", &token, json!({"productId": "p1", "employeeIds": ["e1"]})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wizard_places_an_order_end_to_end() {
    let (app, backend) = app();
    let token = login(&app).await;

    let (status, _) = post(&app, "/placeorder/back", &token, Value::Null).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = post(&app, "/placeorder/items", &token, json!({"products": []})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post(
        &app,
        "/placeorder/customer",
        &token,
        json!({"new": {"name": "Sara", "phone": "0321123", "address": "Karachi"}}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "Please enter a valid phone number");
    let (_, body) = get(&app, "/placeorder", &token).await;
    assert_eq!(body["data"]["wizard"]["customerForm"]["name"], "Sara");

    let (status, body) = post(
        &app,
        "/placeorder/customer",
        &token,
        json!({"new": {"name": "Sara", "phone": "03211234567", "address": "Karachi"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["wizard"]["step"], "items");
    let customer_id = body["data"]["wizard"]["customer"]["_id"].as_str().unwrap().to_owned();

    let (status, _) = post(
        &app,
        "/placeorder/items",
        &token,
        json!({"products": [{"type": "Shirt"}, {"type": ""}]}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, body) = get(&app, "/placeorder", &token).await;
    assert_eq!(body["data"]["wizard"]["products"].as_array().unwrap().len(), 2);

    let (status, body) = post(
        &app,
        "/placeorder/items",
        &token,
        json!({"products": [
            {"type": "Shirt", "options": [{"name": "Collar", "customization": "Band"}]},
            {"type": "Pant", "instructions": "slim fit"}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["wizard"]["step"], "measurements");
    assert_eq!(body["data"]["total"], 2700.0);
    assert_eq!(body["data"]["measurementsRequired"], true);

    let measurements = json!({"chest": 40, "shoulders": 18, "neck": 16, "sleeves": 24,
        "waist": 34, "topLenght": 30, "bottomLenght": 40});
    let mut too_big = measurements.clone();
    too_big["chest"] = json!(150);
    let (status, _) = post(&app, "/placeorder/measurements", &token, too_big).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post(&app, "/placeorder/measurements", &token, measurements).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["wizard"]["step"], "payment");

    let (_, body) = post(&app, "/placeorder/back", &token, Value::Null).await;
    assert_eq!(body["data"]["wizard"]["step"], "measurements");
    assert_eq!(body["data"]["wizard"]["measurements"]["chest"], 40.0);
    let (status, _) = post(&app, "/placeorder/measurements", &token, Value::Null).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(&app, "/placeorder/submit", &token, json!({"total": -5})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, body) = post(&app, "/placeorder/submit", &token, json!({"total": "2500"})).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["navigate"], "/orders");

    {
        let store = backend.store();
        let placed = store.placed.last().unwrap();
        assert_eq!(placed.customer, customer_id);
        assert_eq!(placed.total, 2500.0);
        assert_eq!(placed.products[0].price, 1500.0);
        assert_eq!(placed.products[1].instructions, "slim fit");
        let saved = store.customers.iter().find(|c| c.id == customer_id).unwrap();
        assert_eq!(saved.measurements.map(|m| m.chest), Some(40.0));
        assert_eq!(store.orders.len(), 2);
    }

    let (_, body) = get(&app, "/placeorder", &token).await;
    assert_eq!(body["data"]["wizard"]["step"], "customer");
}

#[tokio::test]
async fn wizard_drafts_are_per_session() {
    let (app, _) = app();
    let first = login(&app).await;
    let second = login(&app).await;
    let (status, _) = post(&app, "/placeorder/customer", &first, json!({"existing": "c1"})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, "/placeorder", &second).await;
    assert_eq!(body["data"]["wizard"]["step"], "customer");
    let (_, body) = post(&app, "/placeorder/reset", &first, Value::Null).await;
    assert_eq!(body["data"]["wizard"]["step"], "customer");
}

#[tokio::test]
async fn customer_screens_validate_before_calling_upstream() {
    let (app, backend) = app();
    let token = login(&app).await;
    let (status, body) = post(
        &app,
        "/customer/add",
        &token,
        json!({"name": "Ali!", "phone": "03001234567", "address": "Lahore"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "Name should not contain special characters");
    assert_eq!(backend.store().customers.len(), 1);

    let (_, body) = post(&app, "/customer/query", &token, json!({"search": "0300"})).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/customer/view/c1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["orders"].as_array().unwrap().len(), 1);

    let (status, _) = post(&app, "/customer/measurements/c1", &token, json!({"chest": 0})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

fn multipart(uri: &str, token: &str, filename: &str, content_type: &str) -> Request<Body> {
    let body = format!(
        "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\r\n%PDF-1.4 test\r\n--XBOUNDARY--\r\n"
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn measurement_uploads_accept_only_images_and_pdfs() {
    let (app, backend) = app();
    let token = login(&app).await;
    let (status, body) = call(&app, multipart("/customer/upload/c1", &token, "notes.txt", "text/plain")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "Only images and PDF files are allowed");

    let (status, body) = call(&app, multipart("/customer/upload/c1", &token, "scan.pdf", "application/pdf")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let file_id = body["data"]["files"][0]["id"].as_str().unwrap().to_owned();
    assert_eq!(backend.store().uploads.len(), 1);
    assert!(backend.store().customers[0].has_measurement_file());

    let (status, _) = post(&app, "/placeorder/customer", &token, json!({"existing": "c1"})).await;
    assert_eq!(status, StatusCode::OK);
    post(&app, "/placeorder/items", &token, json!({"products": [{"type": "Pant"}]})).await;
    let (status, body) = post(&app, "/placeorder/measurements", &token, Value::Null).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["wizard"]["step"], "payment");

    let (status, _) = send(&app, Method::DELETE, &format!("/customer/file/{file_id}"), Some(&token), Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!backend.store().customers[0].has_measurement_file());
}

#[tokio::test]
async fn employee_screens() {
    let (app, backend) = app();
    let token = login(&app).await;

    let (_, body) = post(&app, "/employee/query", &token, json!({"search": "bil", "role": "Stitcher"})).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert!(body["data"][0].get("password").is_none());

    let (_, body) = get(&app, "/employee/view/e1", &token).await;
    assert_eq!(body["data"]["completed"], 1);
    assert_eq!(body["data"]["pending"], 0);

    let (status, body) = post(&app, "/employee/payment/e1", &token, json!({"payment": 0})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "Amount must be greater than zero");
    let (status, _) = post(&app, "/employee/payment/e1", &token, json!({"payment": "500"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.store().payments, vec![("e1".to_owned(), 500.0)]);

    let (status, _) = post(
        &app,
        "/employee/add",
        &token,
        json!({"name": "Omar", "cnic": "3520212345671", "phone": "03009876543", "password": "pw", "role": "cutter"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let store = backend.store();
    let added = store.employees.last().unwrap();
    assert_eq!(added.cnic, "35202-1234567-1");
    assert_eq!(added.phone, "0300-9876543");
}

#[tokio::test]
async fn item_catalog_screens() {
    let (app, backend) = app();
    let token = login(&app).await;
    let (status, body) = post(&app, "/item/add", &token, json!({"name": "Kurta", "price": 0})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["data"], "Item price is required");
    let (status, _) = post(
        &app,
        "/item/add",
        &token,
        json!({"name": "Kurta", "price": 2000, "options": [{"name": "", "customizations": [""]}]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(backend.store().items.last().unwrap().options.is_empty());
    let (_, body) = get(&app, "/item/list", &token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}
