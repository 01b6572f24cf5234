//! Reqwest-backed request plumbing for the reading-log API.
//!
//! Every call names its operation so failures stay attributable in logs.
//! The gateway never retries and keeps no state beyond the connection pool
//! inside [`reqwest::Client`].

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::credential::Credential;

/// User agent sent when no explicit identity is configured.
pub const DEFAULT_USER_AGENT: &str = "readinglog-client/0.1";

/// Outbound identity settings for API requests.
#[derive(Debug, Clone)]
pub struct GatewayIdentity {
    /// HTTP user-agent sent with every request.
    pub user_agent: String,
}

impl Default for GatewayIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Errors raised by the gateway, each naming the operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request could not be constructed.
    #[error("{operation}: request could not be built: {message}")]
    Request {
        /// Operation that failed.
        operation: &'static str,
        /// Construction failure summary.
        message: String,
    },
    /// The request left the client but no usable response came back.
    #[error("{operation}: transport failure: {message}")]
    Transport {
        /// Operation that failed.
        operation: &'static str,
        /// Transport failure summary.
        message: String,
    },
    /// The request timed out.
    #[error("{operation}: timed out: {message}")]
    Timeout {
        /// Operation that failed.
        operation: &'static str,
        /// Timeout summary.
        message: String,
    },
    /// The backend answered with a non-success status.
    #[error("{operation}: status {status}: {preview}")]
    Status {
        /// Operation that failed.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Whitespace-compacted body excerpt.
        preview: String,
    },
    /// The response body did not decode as the expected payload.
    #[error("{operation}: response failed to decode: {message}")]
    Decode {
        /// Operation that failed.
        operation: &'static str,
        /// Decode failure summary.
        message: String,
    },
}

impl GatewayError {
    fn request(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Request {
            operation,
            message: message.into(),
        }
    }

    fn decode(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            operation,
            message: message.into(),
        }
    }

    /// Operation the failure belongs to.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Request { operation, .. }
            | Self::Transport { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }

    /// HTTP status code, when the backend answered at all.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Stateless HTTP gateway bound to one API base URL.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl RestGateway {
    /// Build a gateway using a reqwest client with an explicit timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(base_url, timeout, GatewayIdentity::default())
    }

    /// Build a gateway with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        base_url: Url,
        timeout: Duration,
        identity: GatewayIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_agent: identity.user_agent,
        })
    }

    /// Start building a named call against `path`, relative to the base URL.
    pub(crate) fn call(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
    ) -> GatewayCall<'_> {
        GatewayCall {
            gateway: self,
            operation,
            method,
            path: path.to_owned(),
            query: Vec::new(),
            credential: None,
            body: None,
        }
    }

    /// POST a multipart form, decoding the JSON response.
    pub(crate) async fn send_multipart<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, GatewayError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|error| GatewayError::request(operation, error.to_string()))?;
        tracing::debug!(operation, url = %url, "issuing multipart api request");
        let response = self
            .client
            .post(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        if !status.is_success() {
            return Err(status_error(operation, status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref())
            .map_err(|error| GatewayError::decode(operation, error.to_string()))
    }
}

/// One named request in construction.
///
/// [`GatewayCall::into_request`] is separated from dispatch so header and
/// URL construction stay inspectable without a network.
pub(crate) struct GatewayCall<'g> {
    gateway: &'g RestGateway,
    operation: &'static str,
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    credential: Option<String>,
    body: Option<Vec<u8>>,
}

impl GatewayCall<'_> {
    /// Attach the credential token, sent verbatim with no scheme prefix.
    pub(crate) fn authenticated(mut self, credential: &Credential) -> Self {
        self.credential = Some(credential.as_str().to_owned());
        self
    }

    /// Append one query parameter.
    pub(crate) fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub(crate) fn json<B: Serialize>(mut self, body: &B) -> Result<Self, GatewayError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|error| GatewayError::request(self.operation, error.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Build the concrete HTTP request.
    pub(crate) fn into_request(self) -> Result<reqwest::Request, GatewayError> {
        let operation = self.operation;
        let mut url = self
            .gateway
            .base_url
            .join(&self.path)
            .map_err(|error| GatewayError::request(operation, error.to_string()))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        let mut request = reqwest::Request::new(self.method, url);
        let headers = request.headers_mut();
        let agent = HeaderValue::from_str(&self.gateway.user_agent)
            .map_err(|error| GatewayError::request(operation, error.to_string()))?;
        headers.insert(USER_AGENT, agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = self.credential {
            let value = HeaderValue::from_str(&token)
                .map_err(|error| GatewayError::request(operation, error.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(bytes) = self.body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *request.body_mut() = Some(bytes.into());
        }
        Ok(request)
    }

    /// Send the request and decode the JSON response.
    pub(crate) async fn dispatch<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        let operation = self.operation;
        let body = self.send_checked().await?;
        serde_json::from_slice(&body)
            .map_err(|error| GatewayError::decode(operation, error.to_string()))
    }

    /// Send the request, requiring only a success status.
    pub(crate) async fn dispatch_empty(self) -> Result<(), GatewayError> {
        self.send_checked().await.map(|_| ())
    }

    async fn send_checked(self) -> Result<Vec<u8>, GatewayError> {
        let operation = self.operation;
        let gateway = self.gateway;
        let request = self.into_request()?;
        tracing::debug!(operation, method = %request.method(), url = %request.url(), "issuing api request");
        let response = gateway
            .client
            .execute(request)
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        if !status.is_success() {
            return Err(status_error(operation, status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

fn map_transport_error(operation: &'static str, error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout {
            operation,
            message: error.to_string(),
        }
    } else {
        GatewayError::Transport {
            operation,
            message: error.to_string(),
        }
    }
}

fn status_error(operation: &'static str, status: StatusCode, body: &[u8]) -> GatewayError {
    GatewayError::Status {
        operation,
        status: status.as_u16(),
        preview: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
