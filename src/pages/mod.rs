mod account;
pub mod customer;
pub mod employee;
pub mod home;
pub mod item;
pub mod order;
pub mod place_order;

use axum::Router;

use crate::AppState;

pub fn pages_router() -> Router<AppState> {
    account::account_router()
        .merge(home::home_router())
        .merge(employee::employee_router())
        .merge(customer::customer_router())
        .merge(item::item_router())
        .merge(order::order_router())
        .merge(place_order::place_order_router())
}
