mod files;
mod index;
pub mod measurements;

use axum::{
    routing::{delete, get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use files::{check_upload, MAX_FILE_SIZE};
pub use measurements::{Measurements, MeasurementsInput};

use crate::{
    libs::format::{format_phone, has_special_chars, is_phone},
    AdminError, AdminResult, AppState,
};

pub fn customer_router() -> Router<AppState> {
    Router::new()
        .route("/customer/query", post(index::query_customers))
        .route("/customer/view/:id", get(index::view_customer))
        .route("/customer/add", post(index::add_customer))
        .route("/customer/edit/:id", post(index::edit_customer))
        .route("/customer/delete/:id", delete(index::delete_customer))
        .route("/customer/measurements/:id", post(index::update_measurements))
        .route("/customer/upload/:id", post(files::upload_files))
        .route("/customer/file/:id", delete(files::remove_file))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub measurements: Option<Measurements>,
    #[serde(default)]
    pub measurement_files: Vec<MeasurementFile>,
}

impl Customer {
    pub fn has_measurement_file(&self) -> bool {
        !self.measurement_files.is_empty()
    }
    /// Search box on the customer list: name (any case) or phone
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty()
            || self.name.to_lowercase().contains(&query.to_lowercase())
            || self.phone.contains(query)
    }
}

/// An uploaded measurement document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Customer fields entered by the operator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl CustomerForm {
    /// Applies the phone mask and trims, then validates.
    pub fn normalized(self) -> AdminResult<Self> {
        let form = Self {
            name: self.name.trim().to_owned(),
            phone: format_phone(&self.phone),
            address: self.address.trim().to_owned(),
        };
        form.validate()?;
        Ok(form)
    }

    pub fn validate(&self) -> AdminResult<()> {
        if self.name.trim().is_empty() || self.phone.is_empty() || self.address.trim().is_empty() {
            Err(AdminError::validation("Please fill all fields"))
        } else if has_special_chars(&self.name) {
            Err(AdminError::validation("Name should not contain special characters"))
        } else if !is_phone(&self.phone) {
            Err(AdminError::validation("Please enter a valid phone number"))
        } else {
            Ok(())
        }
    }
}
