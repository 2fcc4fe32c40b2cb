//! HTTP transport for management controllers.
//!
//! One [`Transport`] per endpoint: it joins the endpoint base URL with
//! resource addresses, attaches Basic authentication, and sends JSON bodies
//! where present. Responses come back raw: status classification happens
//! in [`RawResponse::into_body`], so callers decide what a non-2xx means.
//! No retries at this layer.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::error::{classify_response, RedfishError};

/// Default timeout for controller requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One management controller: where it is and how to authenticate.
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Base URL, scheme plus authority (e.g. `https://10.4.0.12`).
    pub base_url: String,
    /// Controller username.
    pub username: String,
    /// Controller password.
    pub password: String,
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// HTTP transport bound to one endpoint.
#[derive(Clone)]
pub struct Transport {
    /// HTTP client.
    client: Client,
    /// Controller this transport talks to.
    endpoint: Endpoint,
}

impl Transport {
    /// Create a transport for an endpoint.
    ///
    /// Management controllers almost universally present self-signed TLS
    /// certificates, so certificate verification is disabled for this
    /// client instance only. Trust settings are owned per transport and
    /// never shared through process-global state, so clients with different
    /// trust requirements cannot interfere.
    ///
    /// # Errors
    /// Returns `Connection` if the HTTP client cannot be built.
    pub fn new(endpoint: Endpoint) -> Result<Self, RedfishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client, endpoint })
    }

    /// Fetch a resource.
    ///
    /// # Errors
    /// Returns `Connection` when the controller cannot be reached.
    pub async fn get(&self, path: &str) -> Result<RawResponse, RedfishError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Post a JSON body to a resource (Redfish actions).
    ///
    /// # Errors
    /// Returns `Connection` when the controller cannot be reached.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, RedfishError> {
        self.request(Method::POST, path, Some(body)).await
    }

    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<RawResponse, RedfishError> {
        let url = format!("{}{}", self.endpoint.base_url, path);
        debug!(method = %method, url = %url, "controller request");

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}

/// An unclassified controller response: any status, raw body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Classify the status and surrender the body.
    ///
    /// # Errors
    /// `Authentication` for 401/403, `Server` for 5xx, `Request` for any
    /// other non-success status.
    pub fn into_body(self) -> Result<Vec<u8>, RedfishError> {
        classify_response(self.status, self.body)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_basic_auth_header_sent() {
        let server = MockServer::start().await;
        // base64("root:calvin")
        Mock::given(method("GET"))
            .and(path("/redfish/v1/Systems/1"))
            .and(header("authorization", "Basic cm9vdDpjYWx2aW4="))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            Transport::new(Endpoint::new(server.uri(), "root", "calvin")).unwrap();
        let raw = transport.get("/redfish/v1/Systems/1").await.unwrap();
        assert_eq!(raw.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_success_returned_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let transport = Transport::new(Endpoint::new(server.uri(), "u", "p")).unwrap();
        let raw = transport.get("/redfish/v1").await.unwrap();
        assert_eq!(raw.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(raw.body, b"maintenance");

        let err = raw.into_body().unwrap_err();
        assert!(matches!(err, RedfishError::Server { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        // Nothing listens on the discard port.
        let transport =
            Transport::new(Endpoint::new("http://127.0.0.1:9", "u", "p")).unwrap();
        let err = transport.get("/redfish/v1").await.unwrap_err();
        assert!(matches!(err, RedfishError::Connection(_)));
    }

    #[tokio::test]
    async fn test_post_sends_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/redfish/v1/Actions/Reset"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let transport = Transport::new(Endpoint::new(server.uri(), "u", "p")).unwrap();
        let body = serde_json::json!({"ResetType": "On"});
        let raw = transport
            .post_json("/redfish/v1/Actions/Reset", &body)
            .await
            .unwrap();
        assert!(raw.into_body().unwrap().is_empty());
    }
}
