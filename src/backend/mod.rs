//! The upstream REST backend. Every page reaches the shop's data through
//! [`Backend`]; production uses [`HttpBackend`].

mod http;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::Deserialize;

pub use http::HttpBackend;

use crate::{
    pages::{
        customer::{Customer, CustomerForm, MeasurementFile, Measurements},
        employee::{Employee, EmployeeForm},
        item::{Item, ItemForm},
        order::{NewOrder, Order, OrderStatus, Product},
    },
    AdminResult,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginReply {
    pub token: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// A measurement document on its way upstream
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Every call but [`Backend::login`] carries the session's upstream token.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, user_name: &str, password: &str) -> AdminResult<LoginReply>;

    async fn employees(&self, token: &str) -> AdminResult<Vec<Employee>>;
    async fn employee(&self, token: &str, id: &str) -> AdminResult<Employee>;
    async fn add_employee(&self, token: &str, form: &EmployeeForm) -> AdminResult<()>;
    async fn edit_employee(&self, token: &str, id: &str, form: &EmployeeForm) -> AdminResult<()>;
    async fn delete_employee(&self, token: &str, id: &str) -> AdminResult<()>;
    async fn pay_employee(&self, token: &str, id: &str, amount: f64) -> AdminResult<()>;

    async fn customers(&self, token: &str) -> AdminResult<Vec<Customer>>;
    async fn customer(&self, token: &str, id: &str) -> AdminResult<Customer>;
    async fn add_customer(&self, token: &str, form: &CustomerForm) -> AdminResult<Customer>;
    async fn update_customer(&self, token: &str, id: &str, form: &CustomerForm) -> AdminResult<()>;
    async fn update_measurements(
        &self,
        token: &str,
        id: &str,
        measurements: &Measurements,
    ) -> AdminResult<()>;
    async fn delete_customer(&self, token: &str, id: &str) -> AdminResult<()>;
    async fn customer_orders(&self, token: &str, id: &str) -> AdminResult<Vec<Order>>;
    async fn upload_measurement_files(
        &self,
        token: &str,
        customer_id: &str,
        files: Vec<UploadFile>,
    ) -> AdminResult<Vec<MeasurementFile>>;
    async fn remove_measurement_file(&self, token: &str, file_id: &str) -> AdminResult<()>;

    async fn items(&self, token: &str) -> AdminResult<Vec<Item>>;
    async fn add_item(&self, token: &str, form: &ItemForm) -> AdminResult<()>;
    async fn edit_item(&self, token: &str, id: &str, form: &ItemForm) -> AdminResult<()>;
    async fn delete_item(&self, token: &str, id: &str) -> AdminResult<()>;

    async fn orders(&self, token: &str) -> AdminResult<Vec<Order>>;
    async fn order(&self, token: &str, id: &str) -> AdminResult<Order>;
    async fn place_order(&self, token: &str, order: &NewOrder) -> AdminResult<()>;
    async fn update_order_status(&self, token: &str, id: &str, status: OrderStatus) -> AdminResult<()>;
    async fn update_order_payment(&self, token: &str, id: &str, paid: bool) -> AdminResult<()>;

    async fn products(&self, token: &str) -> AdminResult<Vec<Product>>;
    async fn assign_employees(
        &self,
        token: &str,
        product_id: &str,
        employee_ids: &[String],
    ) -> AdminResult<()>;
}
