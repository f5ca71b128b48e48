use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    libs::dser::deser_f64, AdminError, AdminResult, AppState, Response, ResponseResult,
};

pub fn item_router() -> Router<AppState> {
    Router::new()
        .route("/item/list", get(list_items))
        .route("/item/add", post(add_item))
        .route("/item/edit/:id", post(edit_item))
        .route("/item/delete/:id", delete(delete_item))
}

/// A customization axis of a catalog item, e.g. collar style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemOption {
    pub name: String,
    /// Permissible values
    #[serde(default)]
    pub customizations: Vec<String>,
}

/// Catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deser_f64")]
    pub price: f64,
    #[serde(default)]
    pub options: Vec<ItemOption>,
}

impl Item {
    pub fn option(&self, name: &str) -> Option<&ItemOption> {
        self.options.iter().find(|o| o.name == name)
    }
    pub fn allows(&self, option: &str, value: &str) -> bool {
        self.option(option)
            .is_some_and(|o| o.customizations.iter().any(|c| c == value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deser_f64")]
    pub price: f64,
    #[serde(default)]
    pub options: Vec<ItemOption>,
}

impl ItemForm {
    /// Trims names and drops blank options and blank permissible values.
    fn normalized(self) -> Self {
        let options = self
            .options
            .into_iter()
            .filter(|o| !o.name.trim().is_empty())
            .map(|o| ItemOption {
                name: o.name.trim().to_owned(),
                customizations: o
                    .customizations
                    .into_iter()
                    .map(|c| c.trim().to_owned())
                    .filter(|c| !c.is_empty())
                    .collect(),
            })
            .collect();
        Self {
            name: self.name.trim().to_owned(),
            price: self.price,
            options,
        }
    }

    pub fn for_create(self) -> AdminResult<Self> {
        let form = self.for_update()?;
        if form.price <= 0.0 {
            return Err(AdminError::validation("Item price is required"));
        }
        Ok(form)
    }

    pub fn for_update(self) -> AdminResult<Self> {
        let form = self.normalized();
        if form.name.is_empty() {
            return Err(AdminError::validation("Item name is required"));
        }
        if !form.price.is_finite() {
            return Err(AdminError::validation("Item price is required"));
        }
        if form.price < 0.0 {
            return Err(AdminError::validation("Item price must not be negative"));
        }
        Ok(form)
    }
}

async fn list_items(State(state): State<AppState>, headers: HeaderMap) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let items = state.backend.items(session.token()).await?;
    Ok(Response::ok(json!(items)))
}

async fn add_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let form: ItemForm = serde_json::from_value(value)?;
    let form = form.for_create()?;
    state.backend.add_item(session.token(), &form).await?;
    tracing::info!(item = %form.name, "catalog item added");
    Ok(Response::done("Item added successfully"))
}

async fn edit_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    let form: ItemForm = serde_json::from_value(value)?;
    let form = form.for_update()?;
    state.backend.edit_item(session.token(), &id, &form).await?;
    Ok(Response::done("Item updated successfully"))
}

async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ResponseResult {
    let session = state.sessions.require(&headers)?;
    state.backend.delete_item(session.token(), &id).await?;
    Ok(Response::done("Item deleted successfully"))
}
