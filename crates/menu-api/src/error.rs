//! Maps domain failures onto HTTP status codes and the response envelope.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use menu_core::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(e) => match e {
                DomainError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
                DomainError::InvalidReorder { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DomainError::HasDependents { .. } => StatusCode::CONFLICT,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Domain(e) => e.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            tracing::warn!("Request rejected ({}): {}", self.code(), message);
        }

        let body = Json(ApiResponse::<()>::error(self.code(), &message));
        (status, body).into_response()
    }
}
