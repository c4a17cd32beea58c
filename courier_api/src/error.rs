use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use courier_optimizer::error::{ErrorCategory, SolveError};
use serde::Serialize;
use tracing::error;

pub enum ApiError {
    /// The body is not a well-formed routing request.
    InvalidRequest(String),
    Solve(SolveError),
    NotFound(String),
    InternalServerError(String),
}

impl From<SolveError> for ApiError {
    fn from(error: SolveError) -> Self {
        ApiError::Solve(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Serialize)]
struct ErrorDetails {
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<ErrorCategory>,
    message: String,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    details: serde_json::Value,
}

pub fn status_for_category(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Validation => StatusCode::BAD_REQUEST,
        ErrorCategory::Solver => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Timeout => StatusCode::REQUEST_TIMEOUT,
        ErrorCategory::Integrity => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, details) = match self {
            ApiError::InvalidRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorDetails {
                    code: String::from("invalid_request"),
                    category: Some(ErrorCategory::Validation),
                    message,
                    details: serde_json::Value::Null,
                },
            ),
            ApiError::Solve(solve_error) => {
                let category = solve_error.category();
                if category == ErrorCategory::Integrity {
                    error!(error = %solve_error, "Solution failed the integrity checks");
                }

                (
                    status_for_category(category),
                    ErrorDetails {
                        code: solve_error.code(),
                        category: Some(category),
                        message: solve_error.to_string(),
                        details: solve_error.details(),
                    },
                )
            }
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorDetails {
                    code: String::from("not_found"),
                    category: None,
                    message,
                    details: serde_json::Value::Null,
                },
            ),
            ApiError::InternalServerError(message) => {
                error!(%message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetails {
                        code: String::from("internal_error"),
                        category: None,
                        message,
                        details: serde_json::Value::Null,
                    },
                )
            }
        };

        (status, Json(ErrorBody { error: details })).into_response()
    }
}
