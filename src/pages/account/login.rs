use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{AdminError, AppState, Response, ResponseResult};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginID {
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    password: String,
}

pub async fn admin_login(State(state): State<AppState>, Json(value): Json<Value>) -> ResponseResult {
    let login: LoginID = serde_json::from_value(value)?;
    let user_name = login.user_name.trim();
    if user_name.is_empty() || login.password.is_empty() {
        return Err(AdminError::validation("Please enter both username and password").into());
    }
    let reply = match state.backend.login(user_name, &login.password).await {
        Ok(reply) => reply,
        Err(AdminError::Unauthorized(_)) | Err(AdminError::NotFound(_)) => {
            tracing::warn!(user = user_name, "login refused");
            return Err(Response::token_error("Invalid username or password"));
        }
        Err(e) => return Err(e.into()),
    };
    let name = reply.name.unwrap_or_else(|| user_name.to_owned());
    let role = reply.role.unwrap_or_else(|| "admin".to_owned());
    let token = state.sessions.init(reply.token, name.clone(), role.clone())?;
    tracing::info!(user = user_name, "admin logged in");
    Ok(Response::ok(json!({
        "token": token,
        "name": name,
        "role": role,
    })))
}
