//! HTTP mapping for service results.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use crate::common::JobBoardError;

/// Success envelope: `{"success": true, "message": ..., "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data,
    })
}

pub fn ok_with_message<T: Serialize>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: Some(message.into()),
        data,
    })
}

#[derive(Debug)]
pub enum ApiError {
    /// A service call failed; `action` names it for the user message
    Service {
        action: &'static str,
        error: JobBoardError,
    },
    BadRequest(String),
    NotFound(&'static str),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

/// Attach the user-facing action name to a service error.
pub trait ResultExt<T> {
    fn for_action(self, action: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for Result<T, JobBoardError> {
    fn for_action(self, action: &'static str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::Service { action, error })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": message})),
            )
                .into_response(),
            ApiError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                Json(json!({"success": false, "message": format!("{} not found", entity)})),
            )
                .into_response(),
            ApiError::Service { action, error } => {
                let message = error.user_message(action);
                match &error {
                    JobBoardError::Validation(errors) => (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({"success": false, "message": message, "errors": errors})),
                    )
                        .into_response(),
                    JobBoardError::NotFound { .. } => {
                        warn!(action, error = %error, "Not found");
                        (
                            StatusCode::NOT_FOUND,
                            Json(json!({"success": false, "message": message})),
                        )
                            .into_response()
                    }
                    _ => {
                        error!(action, error = %error, "Request failed");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({"success": false, "message": message})),
                        )
                            .into_response()
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_errors_become_generic_500() {
        let response = ApiError::Service {
            action: "create company",
            error: JobBoardError::Persistence(anyhow::anyhow!("duplicate key")),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_become_422() {
        let response = ApiError::Service {
            action: "submit application",
            error: JobBoardError::invalid("name", "Enter your name"),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
