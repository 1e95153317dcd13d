//! The fixed response envelope and HTTP mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into consistent JSON responses and status
//! codes. Every response body is `{error, data, success}` with exactly one
//! of `error`/`data` present.

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{Error, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Fixed response wrapper.
///
/// `success` is redundant with which of the two optional fields is
/// populated; clients rely on it anyway, so it is always emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub success: bool,
}

impl<T> Envelope<T> {
    /// Wrap a successful payload.
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
            success: true,
        }
    }

    /// Wrap a failure kind.
    pub fn failure(kind: ErrorKind) -> Self {
        Self {
            error: Some(kind),
            data: None,
            success: false,
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationError | ErrorKind::ClientError => StatusCode::BAD_REQUEST,
        ErrorKind::UsernameAlreadyTaken | ErrorKind::EmailAlreadyInUse => StatusCode::CONFLICT,
        ErrorKind::UserNotFound => StatusCode::NOT_FOUND,
        ErrorKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        // Every 500 logs its cause before the response leaves the process;
        // the envelope itself carries only the error kind.
        if self.kind() == ErrorKind::ServerError {
            error!(message = self.message(), details = ?self.details(), "request failed");
        }
        HttpResponse::build(self.status_code()).json(Envelope::<()>::failure(self.kind()))
    }
}

/// JSON extractor configuration mapping body-parse failures onto the
/// envelope as `ValidationError` rather than Actix's default error body.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::validation(format!("malformed request body: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    //! Envelope shape and status mapping coverage.
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    fn success_envelope_omits_error() {
        let envelope = Envelope::success(json!({ "username": "alice" }));
        let value = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["username"], "alice");
        assert!(value.get("error").is_none());
    }

    #[rstest]
    fn failure_envelope_omits_data() {
        let envelope = Envelope::<Value>::failure(ErrorKind::UsernameAlreadyTaken);
        let value = serde_json::to_value(&envelope).expect("serialize");

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "UsernameAlreadyTaken");
        assert!(value.get("data").is_none());
    }

    #[rstest]
    #[case(Error::validation("x"), StatusCode::BAD_REQUEST)]
    #[case(Error::client("x"), StatusCode::BAD_REQUEST)]
    #[case(Error::username_taken(), StatusCode::CONFLICT)]
    #[case(Error::email_in_use(), StatusCode::CONFLICT)]
    #[case(Error::user_not_found(), StatusCode::NOT_FOUND)]
    #[case(Error::server("x"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn error_kinds_map_to_expected_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[tokio::test]
    async fn server_error_body_leaks_no_detail() {
        let response = Error::server("connection refused to 10.0.0.7").error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body read");
        let value: Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value, json!({ "error": "ServerError", "success": false }));
    }
}
