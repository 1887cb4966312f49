use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::mixpeek::MixpeekError;
use crate::search::SearchError;

/// Error returned to HTTP clients as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(&'static str),
    BadGateway(&'static str),
    /// Non-success response from Mixpeek, passed through with its status.
    Upstream { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Upstream { status, .. } => *status,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(e) => ApiError::BadRequest(e.to_string()),
            SearchError::Provider(e) => provider_to_api_error(e),
        }
    }
}

fn provider_to_api_error(e: MixpeekError) -> ApiError {
    match e {
        MixpeekError::Api { status, body } => {
            let message = format!("Mixpeek API error: {body}");
            match StatusCode::from_u16(status) {
                Ok(status) => ApiError::Upstream { status, message },
                Err(_) => {
                    warn!(status, "Mixpeek returned an invalid status code");
                    ApiError::Upstream {
                        status: StatusCode::BAD_GATEWAY,
                        message,
                    }
                }
            }
        }
        MixpeekError::Network(e) => {
            error!(error = %e, "Mixpeek request failed");
            ApiError::BadGateway("Failed to perform search")
        }
        MixpeekError::Body(e) => {
            error!(error = %e, "failed to read Mixpeek response");
            ApiError::Internal("Failed to read response")
        }
        MixpeekError::Encode(e) => {
            error!(error = %e, "failed to encode Mixpeek request");
            ApiError::Internal("Failed to process request")
        }
        MixpeekError::Decode(e) => {
            error!(error = %e, "failed to parse Mixpeek response");
            ApiError::Internal("Failed to parse response")
        }
        MixpeekError::Url(e) => {
            error!(error = %e, "failed to construct Mixpeek URL");
            ApiError::Internal("Failed to construct API URL")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Internal(msg) | ApiError::BadGateway(msg) => msg.to_string(),
            ApiError::Upstream { message, .. } => message,
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ValidationError;

    fn from_provider(e: MixpeekError) -> ApiError {
        ApiError::from(SearchError::Provider(e))
    }

    async fn connection_refused() -> reqwest::Error {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        reqwest::get(format!("http://{addr}/")).await.unwrap_err()
    }

    async fn body_json(err: ApiError) -> serde_json::Value {
        let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn validation_error_is_bad_request_with_message() {
        let err = ApiError::from(SearchError::Validation(ValidationError::MissingType {
            index: 2,
        }));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "query 2: type is required"));
    }

    #[test]
    fn provider_status_is_passed_through() {
        let err = from_provider(MixpeekError::Api {
            status: 429,
            body: "slow down".into(),
        });
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(
            matches!(err, ApiError::Upstream { ref message, .. } if message == "Mixpeek API error: slow down")
        );
    }

    #[test]
    fn invalid_provider_status_becomes_bad_gateway() {
        let err = from_provider(MixpeekError::Api {
            status: 42,
            body: String::new(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn decode_failure_hides_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = from_provider(MixpeekError::Decode(cause));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, ApiError::Internal("Failed to parse response")));
    }

    #[test]
    fn url_failure_is_internal() {
        let err = from_provider(MixpeekError::Url(url::ParseError::EmptyHost));
        assert!(matches!(err, ApiError::Internal("Failed to construct API URL")));
    }

    #[tokio::test]
    async fn network_failure_is_bad_gateway() {
        let err = from_provider(MixpeekError::Network(connection_refused().await));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(err).await,
            serde_json::json!({"error": "Failed to perform search"})
        );
    }

    #[tokio::test]
    async fn body_read_failure_is_internal() {
        let err = from_provider(MixpeekError::Body(connection_refused().await));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(err).await,
            serde_json::json!({"error": "Failed to read response"})
        );
    }

    #[tokio::test]
    async fn encode_failure_is_internal() {
        let cause = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err = from_provider(MixpeekError::Encode(cause));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(err).await,
            serde_json::json!({"error": "Failed to process request"})
        );
    }
}
