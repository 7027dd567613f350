use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use showings::{store, tour};
use tracing::{error, warn};

pub const SCHEDULE_FAILED_MESSAGE: &str = "Failed to calculate tour schedule. Please try again.";

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Schedule(tour::Error),
    Store(store::Error),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg)),
            AppError::Schedule(err @ tour::Error::InvalidInput(_)) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TOUR", err.to_string()),
            ),
            AppError::Schedule(err @ tour::Error::TravelTimeUnavailable { .. }) => {
                warn!("Schedule failed: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError::new("TRAVEL_TIME_UNAVAILABLE", SCHEDULE_FAILED_MESSAGE)
                        .with_details(err.to_string()),
                )
            }
            AppError::Store(err @ store::Error::NotFound(_)) => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", err.to_string()))
            }
            AppError::Store(err @ store::Error::OwnerMismatch(_)) => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", err.to_string()))
            }
            AppError::Store(err @ store::Error::Invalid(_)) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TOUR", err.to_string()),
            ),
            AppError::Store(err) => {
                error!("Tour store failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("STORE_ERROR", err.to_string()),
                )
            }
            AppError::Internal(msg) => {
                error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", msg),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<tour::Error> for AppError {
    fn from(err: tour::Error) -> Self {
        AppError::Schedule(err)
    }
}

impl From<store::Error> for AppError {
    fn from(err: store::Error) -> Self {
        AppError::Store(err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Scheduling task failed: {err}"))
    }
}
