// --- File: crates/roombook_common/src/http.rs ---
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{HttpStatusCode, RoombookError};

/// Extension trait for RoombookError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for RoombookError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("request failed: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": self.public_message(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for RoombookError to make it easier to use in Axum handlers.
impl IntoResponse for RoombookError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Unwraps a JSON body, reporting a malformed one as a validation error.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RoombookError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| RoombookError::ValidationError(rejection.body_text()))
}

/// Unwraps query parameters, reporting malformed ones as a validation error.
pub fn query_params<T>(
    query: Result<axum::extract::Query<T>, QueryRejection>,
) -> Result<T, RoombookError> {
    query
        .map(|axum::extract::Query(params)| params)
        .map_err(|rejection| RoombookError::ValidationError(rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{conflict, internal_error};

    #[tokio::test]
    async fn test_conflict_renders_409_with_message() {
        let response = conflict("This time slot is already booked for this room").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], 409);
        assert_eq!(
            value["error"]["message"],
            "This time slot is already booked for this room"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = internal_error("pool timed out").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("pool timed out"));
    }
}
