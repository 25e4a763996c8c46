use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests. Please try again later.".into(),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let detail = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "invalid value".to_string());
                    format!("{}: {}", field, detail)
                })
            })
            .collect();

        ApiError::Validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use validator::Validate;

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (
                ApiError::Unauthorized("token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::Forbidden("role".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("campaign".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Conflict("already responded".into()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Validation("email".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (
                ApiError::Internal("db down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let error = ApiError::Internal("connection string leaked".into());
        let display = format!("{}", error);
        // the Display impl carries the detail for logs, the HTTP body does not
        assert!(display.contains("connection string leaked"));
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, "Resource not found"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_from_validation_errors() {
        #[derive(Validate)]
        struct Probe {
            #[validate(email(message = "Invalid email address"))]
            email: String,
        }

        let probe = Probe {
            email: "nope".to_string(),
        };
        let error: ApiError = probe.validate().unwrap_err().into();
        match error {
            ApiError::Validation(msg) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("Invalid email address"));
            }
            _ => panic!("Expected Validation error"),
        }
    }
}
