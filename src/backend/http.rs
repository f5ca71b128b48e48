use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Method, RequestBuilder, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Backend, LoginReply, UploadFile};
use crate::{
    pages::{
        customer::{Customer, CustomerForm, MeasurementFile, Measurements},
        employee::{Employee, EmployeeForm},
        item::{Item, ItemForm},
        order::{NewOrder, Order, OrderStatus, Product},
    },
    AdminError, AdminResult,
};

/// Talks to the shop backend over JSON/HTTP
pub struct HttpBackend {
    client: reqwest::Client,
    base: String,
}

/// The message an upstream error body carries, if any
fn upstream_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .find_map(|k| value.get(k)?.as_str().map(str::to_owned))
}

fn status_error(status: StatusCode, message: String) -> AdminError {
    match status {
        StatusCode::NOT_FOUND => AdminError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdminError::Unauthorized(message),
        _ => AdminError::Request(message),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CustomerList {
    Wrapped { customers: Vec<Customer> },
    Plain(Vec<Customer>),
}

#[derive(Deserialize)]
struct Uploaded {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    files: Vec<MeasurementFile>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> AdminResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn request(&self, method: Method, token: &str, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "backend request");
        self.client
            .request(method, format!("{}{}", self.base, path))
            .bearer_auth(token)
    }

    /// Sends and turns a non-2xx answer into an error; `what` completes
    /// "Failed to ..." when the backend gives no message.
    async fn send(&self, request: RequestBuilder, what: &str) -> AdminResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = upstream_message(&body).unwrap_or_else(|| format!("Failed to {what}"));
        tracing::warn!(%status, %message, "backend refused request");
        Err(status_error(status, message))
    }

    async fn fetch<T: DeserializeOwned>(&self, token: &str, path: &str, what: &str) -> AdminResult<T> {
        let response = self.send(self.request(Method::GET, token, path), what).await?;
        Ok(response.json().await?)
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: Method,
        token: &str,
        path: &str,
        body: &B,
        what: &str,
    ) -> AdminResult<()> {
        self.send(self.request(method, token, path).json(body), what)
            .await?;
        Ok(())
    }

    async fn remove(&self, token: &str, path: &str, what: &str) -> AdminResult<()> {
        self.send(self.request(Method::DELETE, token, path), what)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, user_name: &str, password: &str) -> AdminResult<LoginReply> {
        let request = self
            .client
            .get(format!("{}/admin/login", self.base))
            .query(&[("userName", user_name), ("password", password)]);
        let response = self.send(request, "log in").await?;
        Ok(response.json().await?)
    }

    async fn employees(&self, token: &str) -> AdminResult<Vec<Employee>> {
        self.fetch(token, "/employee/getallemployee", "fetch employees").await
    }

    async fn employee(&self, token: &str, id: &str) -> AdminResult<Employee> {
        self.fetch(token, &format!("/employee/getemployee/{id}"), "fetch employee details")
            .await
    }

    async fn add_employee(&self, token: &str, form: &EmployeeForm) -> AdminResult<()> {
        self.call(Method::POST, token, "/employee/addemployee", form, "add employee")
            .await
    }

    async fn edit_employee(&self, token: &str, id: &str, form: &EmployeeForm) -> AdminResult<()> {
        let path = format!("/employee/editemployee/{id}");
        self.call(Method::POST, token, &path, form, "update employee").await
    }

    async fn delete_employee(&self, token: &str, id: &str) -> AdminResult<()> {
        self.remove(token, &format!("/employee/deleteemployee/{id}"), "delete employee")
            .await
    }

    async fn pay_employee(&self, token: &str, id: &str, amount: f64) -> AdminResult<()> {
        let path = format!("/employee/makepayment/{id}");
        let body = json!({ "payment": amount });
        self.call(Method::POST, token, &path, &body, "process payment").await
    }

    async fn customers(&self, token: &str) -> AdminResult<Vec<Customer>> {
        let list: CustomerList = self
            .fetch(token, "/customer/getallcustomers", "fetch customers")
            .await?;
        Ok(match list {
            CustomerList::Wrapped { customers } | CustomerList::Plain(customers) => customers,
        })
    }

    async fn customer(&self, token: &str, id: &str) -> AdminResult<Customer> {
        self.fetch(token, &format!("/customer/{id}"), "fetch customer").await
    }

    async fn add_customer(&self, token: &str, form: &CustomerForm) -> AdminResult<Customer> {
        let request = self
            .request(Method::POST, token, "/customer/add")
            .json(&json!({ "customer": form }));
        let response = self.send(request, "add customer").await?;
        Ok(response.json().await?)
    }

    async fn update_customer(&self, token: &str, id: &str, form: &CustomerForm) -> AdminResult<()> {
        let path = format!("/customer/update/{id}");
        let body = json!({ "customer": form });
        self.call(Method::PUT, token, &path, &body, "update customer").await
    }

    async fn update_measurements(
        &self,
        token: &str,
        id: &str,
        measurements: &Measurements,
    ) -> AdminResult<()> {
        let path = format!("/customer/update/{id}");
        let body = json!({ "measurements": measurements });
        self.call(Method::PUT, token, &path, &body, "update measurements").await
    }

    async fn delete_customer(&self, token: &str, id: &str) -> AdminResult<()> {
        self.remove(token, &format!("/customer/delete/{id}"), "delete customer")
            .await
    }

    async fn customer_orders(&self, token: &str, id: &str) -> AdminResult<Vec<Order>> {
        self.fetch(token, &format!("/order/customer/{id}"), "fetch customer orders")
            .await
    }

    async fn upload_measurement_files(
        &self,
        token: &str,
        customer_id: &str,
        files: Vec<UploadFile>,
    ) -> AdminResult<Vec<MeasurementFile>> {
        let mut form = Form::new().text("customerId", customer_id.to_owned());
        for file in files {
            let part = Part::bytes(file.bytes)
                .file_name(file.name)
                .mime_str(&file.content_type)?;
            form = form.part("files", part);
        }
        let request = self
            .request(Method::POST, token, "/customer/upload-measurement-files")
            .multipart(form);
        let uploaded: Uploaded = self.send(request, "upload files").await?.json().await?;
        if !uploaded.success {
            return Err(AdminError::Request(
                uploaded
                    .message
                    .unwrap_or_else(|| "Failed to upload files".to_owned()),
            ));
        }
        Ok(uploaded.files)
    }

    async fn remove_measurement_file(&self, token: &str, file_id: &str) -> AdminResult<()> {
        let path = format!("/customer/remove-measurement-file/{file_id}");
        self.remove(token, &path, "remove file").await
    }

    async fn items(&self, token: &str) -> AdminResult<Vec<Item>> {
        self.fetch(token, "/items/getallitems", "fetch items").await
    }

    async fn add_item(&self, token: &str, form: &ItemForm) -> AdminResult<()> {
        self.call(Method::POST, token, "/items/additem", form, "add item")
            .await
    }

    async fn edit_item(&self, token: &str, id: &str, form: &ItemForm) -> AdminResult<()> {
        let path = format!("/items/edititem/{id}");
        self.call(Method::POST, token, &path, form, "update item").await
    }

    async fn delete_item(&self, token: &str, id: &str) -> AdminResult<()> {
        self.remove(token, &format!("/items/deleteitem/{id}"), "delete item")
            .await
    }

    async fn orders(&self, token: &str) -> AdminResult<Vec<Order>> {
        self.fetch(token, "/order/getallorders", "fetch orders").await
    }

    async fn order(&self, token: &str, id: &str) -> AdminResult<Order> {
        self.fetch(token, &format!("/order/{id}"), "fetch order details")
            .await
    }

    async fn place_order(&self, token: &str, order: &NewOrder) -> AdminResult<()> {
        self.call(Method::POST, token, "/order/placeorder", order, "place order")
            .await
    }

    async fn update_order_status(&self, token: &str, id: &str, status: OrderStatus) -> AdminResult<()> {
        let path = format!("/order/update/status/{id}");
        let body = json!({ "status": status });
        self.call(Method::PUT, token, &path, &body, "update order status")
            .await
    }

    async fn update_order_payment(&self, token: &str, id: &str, paid: bool) -> AdminResult<()> {
        let path = format!("/order/update/payment/{id}");
        let body = json!({ "paid": paid });
        self.call(Method::PUT, token, &path, &body, "update payment status")
            .await
    }

    async fn products(&self, token: &str) -> AdminResult<Vec<Product>> {
        self.fetch(token, "/product/getallproducts", "fetch products").await
    }

    async fn assign_employees(
        &self,
        token: &str,
        product_id: &str,
        employee_ids: &[String],
    ) -> AdminResult<()> {
        let body = json!({ "employeeIds": employee_ids, "productId": product_id });
        self.call(Method::POST, token, "/product/assignemployees", &body, "assign employees")
            .await
    }
}
