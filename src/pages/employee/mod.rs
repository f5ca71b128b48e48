mod index;

use std::fmt::Display;

use axum::{
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    libs::{
        dser::{deser_empty_to_none, deser_f64},
        format::{format_cnic, format_phone, has_special_chars, is_cnic, is_phone},
    },
    pages::order::Product,
    AdminError, AdminResult, AppState,
};

pub fn employee_router() -> Router<AppState> {
    Router::new()
        .route("/employee/query", post(index::query_employees))
        .route("/employee/view/:id", get(index::view_employee))
        .route("/employee/add", post(index::add_employee))
        .route("/employee/edit/:id", post(index::edit_employee))
        .route("/employee/delete/:id", delete(index::delete_employee))
        .route("/employee/payment/:id", post(index::make_payment))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Cutter,
    Stitcher,
    Designer,
    Sales,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Cutter, Role::Stitcher, Role::Designer, Role::Sales];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Cutter => "cutter",
            Role::Stitcher => "stitcher",
            Role::Designer => "designer",
            Role::Sales => "sales",
        }
    }
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown employee role `{value}`"))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee as returned by the backend. The password is never read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cnic: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    /// Signed running balance; negative is owed by the shop
    #[serde(default, deserialize_with = "deser_f64")]
    pub payment: f64,
    /// Assigned product ids
    #[serde(default)]
    pub products: Vec<String>,
}

impl Employee {
    pub fn matches(&self, search: &str, role: &str) -> bool {
        let search = search.trim().to_lowercase();
        let text = search.is_empty()
            || self.name.to_lowercase().contains(&search)
            || self.phone.contains(&search);
        let role = role.trim();
        let role = role.is_empty() || role.eq_ignore_ascii_case("all") || self.role.as_str().eq_ignore_ascii_case(role);
        text && role
    }

    pub fn is_assigned(&self, product: &Product) -> bool {
        self.products.contains(&product.id) || product.assigned_employees.contains(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cnic: String,
    #[serde(default)]
    pub phone: String,
    #[serde(
        default,
        deserialize_with = "deser_empty_to_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub password: Option<String>,
    #[serde(default)]
    pub role: String,
}

impl EmployeeForm {
    fn masked(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            cnic: format_cnic(&self.cnic),
            phone: format_phone(&self.phone),
            password: self.password,
            role: self.role.trim().to_lowercase(),
        }
    }

    /// Every field is required when hiring.
    pub fn for_create(self) -> AdminResult<Self> {
        let form = self.masked();
        if form.name.is_empty() {
            return Err(AdminError::validation("Name is required"));
        }
        if has_special_chars(&form.name) {
            return Err(AdminError::validation("Name should not contain special characters"));
        }
        if !is_cnic(&form.cnic) {
            return Err(AdminError::validation("Please enter a valid CNIC"));
        }
        if !is_phone(&form.phone) {
            return Err(AdminError::validation("Please enter a valid phone number"));
        }
        if form.password.is_none() {
            return Err(AdminError::validation("Password is required"));
        }
        if Role::parse(&form.role).is_none() {
            return Err(AdminError::validation("Please select an employee type"));
        }
        Ok(form)
    }

    /// Edits only re-check the masked fields; a blank password keeps the old one.
    pub fn for_update(self) -> AdminResult<Self> {
        let form = self.masked();
        if !is_cnic(&form.cnic) {
            return Err(AdminError::validation("CNIC must be 15 characters long"));
        }
        if !is_phone(&form.phone) {
            return Err(AdminError::validation("Phone number must be 12 characters long"));
        }
        if !form.role.is_empty() && Role::parse(&form.role).is_none() {
            return Err(AdminError::validation("Please select an employee type"));
        }
        Ok(form)
    }
}
