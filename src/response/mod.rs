use std::fmt::Display;

use axum::{extract::multipart::MultipartError, http::StatusCode, Json};
use serde::{ser::SerializeStruct, Serialize};
use serde_json::{json, Value};

use crate::AdminError;

/// Envelope of every page answer
#[derive(Debug)]
pub struct Response {
    /// HTTP status code
    code: StatusCode,
    status: i32,
    data: Value,
}

impl axum::response::IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        (self.code, Json(self)).into_response()
    }
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Response", 3)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("code", &self.code.as_u16())?;
        s.serialize_field("data", &self.data)?;
        s.end()
    }
}
impl Response {
    pub fn new(code: StatusCode, status: i32, data: Value) -> Response {
        Self { code, status, data }
    }
    pub fn ok(data: Value) -> Self {
        Self {
            code: StatusCode::OK,
            status: 0,
            data,
        }
    }
    /// Success notification shown to the operator
    pub fn done(msg: impl Display) -> Self {
        Self::ok(json!({ "message": msg.to_string() }))
    }
    pub fn token_error(e: impl Display) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, -1, json!(e.to_string()))
    }
    pub fn internal_server_error(e: impl Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, -1, json!(e.to_string()))
    }
    /// Malformed request body or parameter
    pub fn invalid_format(e: impl Display) -> Self {
        Self::new(StatusCode::BAD_REQUEST, 1, json!(e.to_string()))
    }
    pub fn not_exist(e: impl Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, 2, json!(e.to_string()))
    }
    /// Form validation failed
    pub fn invalid_value(e: impl Display) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, 7, json!(e.to_string()))
    }
    pub fn invalid_transition(e: impl Display) -> Self {
        Self::new(StatusCode::CONFLICT, 8, json!(e.to_string()))
    }
    /// The upstream backend failed; the operator may retry
    pub fn bad_gateway(e: impl Display) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, 9, json!(e.to_string()))
    }
    pub fn code(&self) -> StatusCode {
        self.code
    }
    pub fn status(&self) -> i32 {
        self.status
    }
    pub fn data(&self) -> &Value {
        &self.data
    }
}

impl From<AdminError> for Response {
    fn from(value: AdminError) -> Self {
        match value {
            AdminError::Validation(e) => Response::invalid_value(e),
            AdminError::InvalidTransition(e) => Response::invalid_transition(e),
            AdminError::Request(e) => Response::bad_gateway(e),
            AdminError::NotFound(e) => Response::not_exist(e),
            AdminError::Unauthorized(e) => Response::token_error(e),
            AdminError::Internal(e) => Response::internal_server_error(e),
        }
    }
}
impl From<std::io::Error> for Response {
    fn from(value: std::io::Error) -> Self {
        Response::internal_server_error(value)
    }
}

impl From<serde_json::Error> for Response {
    fn from(value: serde_json::Error) -> Self {
        Response::invalid_format(value)
    }
}
impl From<MultipartError> for Response {
    fn from(value: MultipartError) -> Self {
        Response::invalid_format(value)
    }
}
