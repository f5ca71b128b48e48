use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{libs::dser::deser_f64, pages::customer::Customer};

/// The fixed order workflow, in sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "shipped")]
    Shipped,
}

impl OrderStatus {
    pub const SEQUENCE: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Shipped,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Shipped => "shipped",
        }
    }
    pub fn index(self) -> usize {
        self as usize
    }
    pub fn next(self) -> Option<Self> {
        Self::SEQUENCE.get(self.index() + 1).copied()
    }
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::SEQUENCE[i])
    }
    /// Case-insensitive, as typed in the status filter
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::SEQUENCE
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value))
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orders come back with the customer either populated or as a bare id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Populated(Box<Customer>),
    Id(String),
}

impl CustomerRef {
    pub fn id(&self) -> &str {
        match self {
            CustomerRef::Populated(c) => &c.id,
            CustomerRef::Id(id) => id,
        }
    }
    pub fn name(&self) -> Option<&str> {
        match self {
            CustomerRef::Populated(c) => Some(&c.name),
            CustomerRef::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    /// Creation time
    pub date: DateTime<Utc>,
    pub customer: CustomerRef,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(deserialize_with = "deser_f64")]
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub customization: String,
}

/// A line item of a placed order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default)]
    pub id: String,
    /// Name of the catalog item
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default, deserialize_with = "deser_f64")]
    pub price: f64,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
    #[serde(default)]
    pub assigned_employees: Vec<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

/// A line item before the order is placed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLineItem {
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, deserialize_with = "deser_f64")]
    pub price: f64,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
}

/// Body of `POST /order/placeorder`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Customer id
    pub customer: String,
    pub products: Vec<NewLineItem>,
    pub total: f64,
}
