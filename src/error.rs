use thiserror::Error;

pub type AdminResult<T> = Result<T, AdminError>;

/// Failures surfaced to the operator as a notification.
///
/// `Validation` never reaches the backend; `Request` is an upstream or
/// network failure the operator may retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdminError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidTransition(String),
    #[error("{0}")]
    Request(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

impl AdminError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
    pub fn transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Request("Backend did not answer in time".to_owned())
        } else if value.is_decode() {
            Self::Request(format!("Unexpected backend response: {value}"))
        } else {
            Self::Request(format!("Backend request failed: {value}"))
        }
    }
}

impl From<jwt::Error> for AdminError {
    fn from(value: jwt::Error) -> Self {
        Self::Internal(format!("token error: {value}"))
    }
}
