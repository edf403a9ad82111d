//! Raw HTTP exchange used underneath the authenticated wrapper.
//!
//! This module provides the [`HttpTransport`] trait, which can be substituted in
//! tests, and the [`ReqwestTransport`] default implementation.

use log::debug;
use mockall::automock;
use reqwest::{Client, Method, StatusCode, header::HeaderMap};
use serde::de::DeserializeOwned;

/// A fully built outbound request.
///
/// Produced once per call by [`crate::http::AuthenticatedTransport`] and never persisted.
#[derive(Debug, Clone)]
pub struct AuthenticatedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Merged headers, the authorization value is flagged as sensitive
    pub headers: HeaderMap,
    /// Serialized JSON body, if any
    pub body: Option<String>,
}

/// Response of a single HTTP exchange, body already read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: StatusCode,
    /// Reason phrase of the status, e.g. `Not Found`
    pub status_text: String,
    /// Raw response body
    pub body: String,
}

impl HttpResponse {
    /// Creates a response whose status text is the canonical reason of `status`.
    ///
    /// Codes without a registered reason phrase (e.g. `520`) use the numeric code.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_owned)
            .unwrap_or_else(|| status.as_str().to_owned());

        HttpResponse {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// Decodes the body as JSON.
    ///
    /// A body that doesn't match `T` is reported as a [`serde_json::Error`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Performs one HTTP exchange.
///
/// Implementations send the request as is: no retry, no header rewriting and no
/// status classification. This trait is the substitution point used in tests.
#[automock]
pub trait HttpTransport {
    /// Sends `request` and returns the response, whatever its status.
    async fn send(&self, request: AuthenticatedRequest) -> anyhow::Result<HttpResponse>;
}

/// [`HttpTransport`] backed by a [`reqwest::Client`].
///
/// Timeouts, proxies and TLS settings are the ones of the wrapped client, see
/// [`ReqwestTransport::with_client`].
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    /// HTTP client
    client: Client,
}

impl ReqwestTransport {
    /// Create a new [ReqwestTransport] with a default reqwest client.
    pub fn new() -> Self {
        ReqwestTransport {
            client: Client::new(),
        }
    }

    /// Create a new [ReqwestTransport] around a preconfigured reqwest client.
    ///
    /// # Arguments
    ///
    /// * `client` - The reqwest client, e.g. built with a request timeout.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use nimbus::http::ReqwestTransport;
    ///
    /// let client = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    /// let transport = ReqwestTransport::with_client(client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        ReqwestTransport { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: AuthenticatedRequest) -> anyhow::Result<HttpResponse> {
        debug!("request {} {}", &request.method, &request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            "response from {} -> {} ({} bytes)",
            &request.url,
            status,
            body.len()
        );

        Ok(HttpResponse::new(status, body))
    }
}
