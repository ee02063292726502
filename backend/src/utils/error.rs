use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients by the gateway's middleware and handlers.
///
/// Locale resolution itself never fails; these cover the few places where
/// a computed value has to be turned into something the wire accepts.
#[derive(Error, Debug)]
pub enum ApiError {
    // Routing errors 1xxx
    #[error("Invalid redirect target: {0}")]
    InvalidRedirect(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    pub fn invalid_redirect(location: impl Into<String>) -> Self {
        Self::InvalidRedirect(location.into())
    }

    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::InvalidRedirect(_) => 1001,
            Self::InvalidHeader(_) => 1002,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = match self {
            Self::InvalidRedirect(_) | Self::InvalidHeader(_) => StatusCode::BAD_REQUEST,
        };

        tracing::warn!("Request failed with code {}: {}", code, self);

        let response = ApiErrorResponse { code, message: self.to_string() };
        (status, Json(response)).into_response()
    }
}

/// Start-up errors raised while validating the locale configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LocaleError {
    #[error("At least one supported locale must be configured")]
    NoSupportedLocales,

    #[error("Locale tag '{0}' is not a valid BCP-47 language tag")]
    InvalidTag(String),

    #[error("Locale tag '{0}' is configured more than once")]
    DuplicateTag(String),

    #[error("Default locale '{0}' is not one of the supported locales")]
    DefaultNotSupported(String),

    #[error("'{0}' is not a valid HTTP header name")]
    InvalidHeaderName(String),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),
}
