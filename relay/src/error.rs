use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub use mailhook_macros::HttpError;

use crate::key::KeyError;
use crate::mail::MailError;
use crate::message::{MessageError, RenderError};

/// Webhook response body: `{"errcode": 0, "errmsg": "ok"}` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub errcode: u32,
    pub errmsg: String,
}

impl Reply {
    pub fn ok() -> Self {
        Reply {
            errcode: 0,
            errmsg: "ok".to_string(),
        }
    }
}

/// Every way a webhook request can fail, with its errcode.
#[derive(Debug, thiserror::Error, HttpError)]
pub enum ApiError {
    #[error("invalid json body: {0}")]
    #[http_error(BAD_REQUEST, "Invalid JSON body", errcode = 40001)]
    InvalidBody(#[source] serde_json::Error),

    #[error("unreadable request body: {0}")]
    #[http_error(BAD_REQUEST, "Invalid JSON body", errcode = 40001)]
    UnreadableBody(#[source] BytesRejection),

    #[error("request body exceeds the size limit")]
    #[http_error(PAYLOAD_TOO_LARGE, "Request body too large", errcode = 40001)]
    BodyTooLarge,

    #[error("invalid message type: {0}")]
    #[http_error(BAD_REQUEST, "Invalid message type", errcode = 40002)]
    InvalidType(#[from] MessageError),

    #[error("render failed: {0}")]
    #[http_error(INTERNAL_SERVER_ERROR, "Failed to generate HTML content", errcode = 40003)]
    RenderFailure(#[from] RenderError),

    #[error("delivery failed: {0}")]
    #[http_error(INTERNAL_SERVER_ERROR, "Failed to send email: {0}", errcode = 40004)]
    DeliveryFailure(#[from] MailError),

    #[error("{0}")]
    #[http_error(BAD_REQUEST, "invalid Base64 parameter", errcode = 40008)]
    InvalidKey(#[source] KeyError),

    #[error("{0}")]
    #[http_error(BAD_REQUEST, "invalid parameter format", errcode = 40009)]
    FieldCount(#[source] KeyError),

    #[error("missing key parameter")]
    #[http_error(BAD_REQUEST, errcode = 40012)]
    MissingKey,

    #[error("{0}")]
    #[http_error(BAD_REQUEST, "invalid SMTP host or port", errcode = 40013)]
    InvalidHost(#[source] KeyError),
}

impl From<KeyError> for ApiError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::Base64(_) | KeyError::Utf8(_) => ApiError::InvalidKey(err),
            KeyError::FieldCount(_) | KeyError::Separator(_) => ApiError::FieldCount(err),
            KeyError::HostPort(_) => ApiError::InvalidHost(err),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == http::StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::UnreadableBody(rejection)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.http_code().is_server_error() {
            tracing::error!("Error Status {}: {}", self.http_code(), self);
        } else {
            tracing::debug!("Error Status {}: {}", self.http_code(), self);
        }

        let body = Json(Reply {
            errcode: self.err_code(),
            errmsg: self.http_message(),
        });
        (self.http_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn key_error(key: &str) -> ApiError {
        crate::key::RoutingSpec::decode(key).unwrap_err().into()
    }

    #[test]
    fn key_errors_map_to_distinct_codes() {
        use base64::prelude::*;

        let err = key_error("@@@");
        assert_eq!(err.err_code(), 40008);
        assert_eq!(err.http_code(), StatusCode::BAD_REQUEST);

        let err = key_error(&BASE64_STANDARD.encode("h:1|user"));
        assert_eq!(err.err_code(), 40009);

        let err = key_error(&BASE64_STANDARD.encode("h:0|user|pw"));
        assert_eq!(err.err_code(), 40013);
    }

    #[test]
    fn delivery_failure_includes_detail() {
        let err = ApiError::from(MailError::Smtp("connection refused".into()));
        assert_eq!(err.err_code(), 40004);
        assert_eq!(err.http_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.http_message(),
            "Failed to send email: SMTP error: connection refused"
        );
    }

    #[test]
    fn render_failure_is_server_error() {
        let err = ApiError::from(RenderError::NoArticles);
        assert_eq!(err.err_code(), 40003);
        assert_eq!(err.http_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.http_message(), "Failed to generate HTML content");
    }

    #[test]
    fn missing_key() {
        let err = ApiError::MissingKey;
        assert_eq!(err.err_code(), 40012);
        assert_eq!(err.http_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.http_message(), "missing key parameter");
    }

    #[test]
    fn reply_serializes_as_errcode_errmsg() {
        let json = serde_json::to_value(Reply::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"errcode": 0, "errmsg": "ok"}));
    }
}
