//! Error taxonomy and HTTP status classification.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by Redfish operations.
#[derive(Error, Debug)]
pub enum RedfishError {
    /// Controller unreachable: refused connection, TLS failure, timeout.
    /// Never retried automatically.
    #[error("connection error: {0}")]
    Connection(String),

    /// Controller rejected the credentials (401/403). Fatal.
    #[error("authentication rejected: HTTP {status}")]
    Authentication {
        /// HTTP status code.
        status: u16,
    },

    /// Controller-side failure (5xx). The caller may retry later.
    #[error("controller error: HTTP {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// Malformed request or unsupported resource (other non-success
    /// statuses). Fatal.
    #[error("request rejected: HTTP {status}: {message}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// Response did not match any known schema. May indicate an unsupported
    /// firmware version.
    #[error("decode error at {path}: {message}")]
    Decode {
        /// Resource address the payload came from.
        path: String,
        /// Underlying parse failure.
        message: String,
    },

    /// No event-log schema range covers the supplied firmware version.
    #[error("unresolvable firmware version: {0:?}")]
    Resolution(String),

    /// Vendor tag outside the supported set.
    #[error("unsupported vendor: {0:?}")]
    UnsupportedVendor(String),
}

impl From<reqwest::Error> for RedfishError {
    fn from(err: reqwest::Error) -> Self {
        // Errors from reqwest at this layer are transport failures; HTTP
        // statuses never reach this conversion because responses are
        // returned raw and classified below.
        Self::Connection(err.to_string())
    }
}

/// Classify an HTTP response, returning the body for success statuses.
pub(crate) fn classify_response(
    status: StatusCode,
    body: Vec<u8>,
) -> Result<Vec<u8>, RedfishError> {
    if status.is_success() {
        return Ok(body);
    }

    let message = String::from_utf8_lossy(&body).into_owned();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RedfishError::Authentication {
            status: status.as_u16(),
        },
        s if s.is_server_error() => RedfishError::Server {
            status: s.as_u16(),
            message,
        },
        s => RedfishError::Request {
            status: s.as_u16(),
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes_body_through() {
        let body = classify_response(StatusCode::OK, b"{}".to_vec()).unwrap();
        assert_eq!(body, b"{}");

        let body = classify_response(StatusCode::NO_CONTENT, Vec::new()).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_auth_statuses() {
        let err = classify_response(StatusCode::UNAUTHORIZED, Vec::new()).unwrap_err();
        assert!(matches!(err, RedfishError::Authentication { status: 401 }));

        let err = classify_response(StatusCode::FORBIDDEN, Vec::new()).unwrap_err();
        assert!(matches!(err, RedfishError::Authentication { status: 403 }));
    }

    #[test]
    fn test_server_and_request_statuses() {
        let err =
            classify_response(StatusCode::INTERNAL_SERVER_ERROR, b"boom".to_vec()).unwrap_err();
        assert!(matches!(err, RedfishError::Server { status: 500, .. }));

        let err = classify_response(StatusCode::NOT_FOUND, Vec::new()).unwrap_err();
        assert!(matches!(err, RedfishError::Request { status: 404, .. }));
    }

    #[test]
    fn test_error_display() {
        let err = RedfishError::Connection("connect refused".to_string());
        assert_eq!(err.to_string(), "connection error: connect refused");

        let err = RedfishError::Resolution("not.a.version".to_string());
        assert_eq!(
            err.to_string(),
            "unresolvable firmware version: \"not.a.version\""
        );
    }
}
