//! Chart series for the dashboard, derived from the full collections on
//! every request.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pages::{
    item::Item,
    order::{Order, OrderStatus, Product},
};

/// Garment types charted on the dashboard, in display order
pub const PRODUCT_TYPES: [&str; 5] = [
    "Shalwar Suit",
    "Pant",
    "Shirt",
    "Two Piece Suit",
    "Three Piece Suit",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    /// Trailing 7 days
    #[default]
    Week,
    /// Trailing 30 days
    Month,
    /// Trailing 12 calendar months
    Year,
}

impl TimeFrame {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

pub fn revenue_by_period(orders: &[Order], frame: TimeFrame, today: NaiveDate) -> RevenueSeries {
    match frame {
        TimeFrame::Week => daily_revenue(orders, today, 7),
        TimeFrame::Month => daily_revenue(orders, today, 30),
        TimeFrame::Year => monthly_revenue(orders, today, 12),
    }
}

fn daily_revenue(orders: &[Order], today: NaiveDate, days: u64) -> RevenueSeries {
    let start = today - Days::new(days - 1);
    let mut values = vec![0.0; days as usize];
    for order in orders {
        let day = order.date.date_naive();
        if (start..=today).contains(&day) {
            values[(day - start).num_days() as usize] += order.total;
        }
    }
    let labels = (0..days)
        .map(|i| (start + Days::new(i)).format("%d %b").to_string())
        .collect();
    RevenueSeries { labels, values }
}

/// Months are keyed as `year * 12 + month0`.
fn month_key(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn monthly_revenue(orders: &[Order], today: NaiveDate, months: i32) -> RevenueSeries {
    let last = month_key(today);
    let first = last - (months - 1);
    let mut values = vec![0.0; months as usize];
    for order in orders {
        let key = month_key(order.date.date_naive());
        if (first..=last).contains(&key) {
            values[(key - first) as usize] += order.total;
        }
    }
    let labels = (first..=last)
        .map(|key| {
            NaiveDate::from_ymd_opt(key.div_euclid(12), key.rem_euclid(12) as u32 + 1, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default()
        })
        .collect();
    RevenueSeries { labels, values }
}

/// Percentage of orders per status, as `[pending, inProgress, completed, shipped]`
pub fn status_distribution(orders: &[Order]) -> [f64; 4] {
    let mut counts = [0usize; 4];
    for order in orders {
        counts[order.status.index()] += 1;
    }
    if orders.is_empty() {
        return [0.0; 4];
    }
    counts.map(|c| c as f64 / orders.len() as f64 * 100.0)
}

/// Line items per garment type; when no line item names one of them the
/// catalog is counted instead.
pub fn product_type_distribution(orders: &[Order], items: &[Item]) -> [usize; 5] {
    let from_orders = count_types(
        orders
            .iter()
            .flat_map(|o| o.products.iter().map(|p| p.ty.as_str())),
    );
    if from_orders.iter().any(|c| *c > 0) {
        from_orders
    } else {
        count_types(items.iter().map(|i| i.name.as_str()))
    }
}

fn count_types<'a>(names: impl Iterator<Item = &'a str>) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for name in names {
        if let Some(i) = PRODUCT_TYPES.iter().position(|t| *t == name) {
            counts[i] += 1;
        }
    }
    counts
}

pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 {
            0.0
        } else {
            100.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Orders created this calendar month against the previous one.
pub fn order_count_trend(orders: &[Order], today: NaiveDate) -> f64 {
    let current = month_key(today);
    let (mut this, mut prev) = (0usize, 0usize);
    for order in orders {
        let key = month_key(order.date.date_naive());
        if key == current {
            this += 1;
        } else if key == current - 1 {
            prev += 1;
        }
    }
    percent_change(prev as f64, this as f64)
}

/// The last bucket of a series against the one before it.
pub fn revenue_trend(series: &RevenueSeries) -> f64 {
    match series.values.as_slice() {
        [.., previous, current] => percent_change(*previous, *current),
        _ => 0.0,
    }
}

#[derive(Debug, Serialize)]
pub struct TypeDistribution {
    pub labels: [&'static str; 5],
    pub counts: [usize; 5],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub frame: TimeFrame,
    pub total_orders: usize,
    pub total_products: usize,
    pub pending_products: usize,
    pub revenue: RevenueSeries,
    pub revenue_trend: f64,
    pub order_trend: f64,
    pub status_distribution: [f64; 4],
    pub product_types: TypeDistribution,
}

pub fn build_dashboard(
    orders: &[Order],
    products: &[Product],
    items: &[Item],
    frame: TimeFrame,
    today: NaiveDate,
) -> Dashboard {
    let revenue = revenue_by_period(orders, frame, today);
    Dashboard {
        frame,
        total_orders: orders.len(),
        total_products: products.len(),
        pending_products: products
            .iter()
            .filter(|p| p.status == OrderStatus::Pending)
            .count(),
        revenue_trend: revenue_trend(&revenue),
        revenue,
        order_trend: order_count_trend(orders, today),
        status_distribution: status_distribution(orders),
        product_types: TypeDistribution {
            labels: PRODUCT_TYPES,
            counts: product_type_distribution(orders, items),
        },
    }
}
