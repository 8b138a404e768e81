use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use common::observability::INPUT_REJECTED_TOTAL;
use common::provider::ProviderError;

/// Everything a handler can fail with: the two client input errors, or a
/// provider failure wrapped with the per-route message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid service_code. Use service mapping only.")]
    UnknownServiceCode,
    #[error("{context}")]
    Upstream {
        context: &'static str,
        #[source]
        source: ProviderError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str, source: ProviderError) -> Self {
        ApiError::Upstream { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::MissingFields | ApiError::UnknownServiceCode => {
                INPUT_REJECTED_TOTAL.inc();
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({"message": message})),
                )
                    .into_response()
            }
            ApiError::Upstream { context, source } => {
                error!(context, error = %source, "upstream call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"message": context, "error": source.detail()})),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn body_of(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn missing_fields_maps_to_400_with_message_body() {
        let resp = ApiError::MissingFields.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(resp).await, json!({"message": "Missing required fields"}));
    }

    #[tokio::test]
    async fn unknown_code_maps_to_400_with_message_body() {
        let resp = ApiError::UnknownServiceCode.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(resp).await,
            json!({"message": "Invalid service_code. Use service mapping only."})
        );
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_500_and_keeps_provider_payload() {
        let err = ApiError::upstream(
            "Order failed",
            ProviderError::Status { status: 402, body: json!({"error": "no funds"}) },
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(resp).await,
            json!({"message": "Order failed", "error": {"error": "no funds"}})
        );
    }

    #[tokio::test]
    async fn transport_failure_maps_to_500_with_error_text() {
        let err = ApiError::upstream(
            "Failed to fetch orders",
            ProviderError::Network("connection refused".into()),
        );
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(resp).await;
        assert_eq!(body["message"], "Failed to fetch orders");
        assert!(body["error"].is_string());
    }
}
