use chrono::NaiveDate;
use serde::Deserialize;

use crate::libs::{
    dser::deser_empty_to_none,
    paging::{paginate, Page},
};

use super::{Order, OrderStatus};

pub const ORDERS_PER_PAGE: usize = 8;

/// Filters of the order list screen
#[derive(Debug, Clone, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub search: String,
    /// `YYYY-MM-DD`, matched against the creation date
    #[serde(default, deserialize_with = "deser_empty_to_none")]
    pub date: Option<String>,
    #[serde(default = "all_statuses")]
    pub status: String,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn all_statuses() -> String {
    "All".to_owned()
}
fn first_page() -> usize {
    1
}

impl Default for OrderQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            date: None,
            status: all_statuses(),
            page: first_page(),
        }
    }
}

impl OrderQuery {
    fn date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
    }

    /// `None` when the status filter shows every status
    fn status(&self) -> Option<OrderStatus> {
        OrderStatus::parse(&self.status)
    }

    pub fn matches(&self, order: &Order) -> bool {
        let search = self.search.trim().to_lowercase();
        let text = search.is_empty()
            || order.id.to_lowercase().contains(&search)
            || order.status.as_str().contains(&search)
            || order
                .customer
                .name()
                .is_some_and(|n| n.to_lowercase().contains(&search));
        let date = self.date().map_or(true, |d| order.date.date_naive() == d);
        let status = self.status().map_or(true, |s| order.status == s);
        text && date && status
    }

    pub fn apply(&self, orders: &[Order]) -> Page<Order> {
        let matched: Vec<Order> = orders.iter().filter(|o| self.matches(o)).cloned().collect();
        paginate(&matched, self.page, ORDERS_PER_PAGE)
    }
}
