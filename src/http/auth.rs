//! Bearer-token wrapper around an [`HttpTransport`].

use log::debug;
use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};

use crate::error::ClientError;
use crate::http::transport::{AuthenticatedRequest, HttpResponse, HttpTransport};

/// Per-call options: method, optional body and header overrides.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Serialized JSON body
    pub body: Option<String>,
    /// Headers overriding the fixed ones on key collision
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Options for a request without body nor extra headers.
    pub fn new(method: Method) -> Self {
        RequestOptions {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header, replacing any previous value of the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Attaches credentials to every request sent through the inner transport.
///
/// Every request carries `Authorization: Bearer <api key>` and
/// `Content-Type: application/json`. A single attempt is made, and any status
/// outside of the 2xx range is turned into a [`ClientError::Request`] carrying
/// the reason phrase of the response.
pub struct AuthenticatedTransport<T: HttpTransport> {
    /// Coordinator API key
    api_key: String,
    /// Injected HTTP primitive
    transport: T,
}

impl<T: HttpTransport> AuthenticatedTransport<T> {
    /// Create a new [AuthenticatedTransport].
    ///
    /// # Arguments
    ///
    /// * `api_key` - The coordinator API key sent as bearer token.
    /// * `transport` - The HTTP primitive performing the exchanges.
    pub fn new(api_key: impl Into<String>, transport: T) -> Self {
        AuthenticatedTransport {
            api_key: api_key.into(),
            transport,
        }
    }

    /// Replaces the API key used by the next requests.
    ///
    /// Requests already sent keep the headers they were built with.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Sends an authenticated request to `url`.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the endpoint.
    /// * `options` - Method, body and header overrides of the call.
    ///
    /// # Errors
    ///
    /// * [`ClientError::InvalidApiKey`] if the key can't be encoded as a header
    /// * [`ClientError::Request`] if the response status is not a success
    /// * Any error of the underlying transport, unchanged
    pub async fn fetch_with_auth(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> anyhow::Result<HttpResponse> {
        let headers = self.merge_headers(options.headers)?;
        let request = AuthenticatedRequest {
            method: options.method,
            url: url.to_owned(),
            headers,
            body: options.body,
        };

        let response = self.transport.send(request).await?;
        if !response.status.is_success() {
            debug!("request to {} failed with {}", url, response.status);
            return Err(ClientError::Request {
                status: response.status,
                status_text: response.status_text,
            }
            .into());
        }

        Ok(response)
    }

    fn merge_headers(&self, overrides: HeaderMap) -> Result<HeaderMap, ClientError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", &self.api_key))
            .map_err(|_| ClientError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Caller headers replace the fixed ones of the same name
        headers.extend(overrides);

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::transport::MockHttpTransport;
    use reqwest::StatusCode;

    fn header<'a>(request: &'a AuthenticatedRequest, name: HeaderName) -> &'a str {
        request.headers.get(name).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_fixed_headers_are_attached() {
        let mut mock_transport = MockHttpTransport::new();
        mock_transport
            .expect_send()
            .withf(|request| {
                header(request, AUTHORIZATION) == "Bearer secret"
                    && header(request, CONTENT_TYPE) == "application/json"
                    && request.method == Method::GET
                    && request.url == "http://coordinator/game_servers"
                    && request.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(StatusCode::OK, "[]")));

        let transport = AuthenticatedTransport::new("secret", mock_transport);
        let response = transport
            .fetch_with_auth("http://coordinator/game_servers", RequestOptions::get())
            .await
            .unwrap();

        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn test_caller_content_type_wins() {
        let mut mock_transport = MockHttpTransport::new();
        mock_transport
            .expect_send()
            .withf(|request| {
                header(request, CONTENT_TYPE) == "text/plain"
                    && header(request, AUTHORIZATION) == "Bearer secret"
                    && request.headers.get_all(CONTENT_TYPE).iter().count() == 1
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(StatusCode::OK, "")));

        let transport = AuthenticatedTransport::new("secret", mock_transport);
        let options = RequestOptions::post()
            .with_body("hello")
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        transport
            .fetch_with_auth("http://coordinator/echo", options)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_fails_with_status_text() {
        let mut mock_transport = MockHttpTransport::new();
        mock_transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(StatusCode::NOT_FOUND, "missing")));

        let transport = AuthenticatedTransport::new("secret", mock_transport);
        let error = transport
            .fetch_with_auth("http://coordinator/game_servers/s1", RequestOptions::delete())
            .await
            .unwrap_err();

        assert!(error.to_string().contains("Not Found"));
        assert!(matches!(
            error.downcast_ref::<ClientError>(),
            Some(ClientError::Request { status, .. }) if *status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_unregistered_status_reports_code() {
        let mut mock_transport = MockHttpTransport::new();
        mock_transport.expect_send().times(1).returning(|_| {
            Ok(HttpResponse::new(StatusCode::from_u16(520).unwrap(), ""))
        });

        let transport = AuthenticatedTransport::new("secret", mock_transport);
        let error = transport
            .fetch_with_auth("http://coordinator/game_servers/s1/start", RequestOptions::post())
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Failed request: 520");
    }

    #[tokio::test]
    async fn test_transport_error_is_propagated() {
        let mut mock_transport = MockHttpTransport::new();
        mock_transport
            .expect_send()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection refused")));

        let transport = AuthenticatedTransport::new("secret", mock_transport);
        let error = transport
            .fetch_with_auth("http://coordinator/game_servers", RequestOptions::get())
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_set_api_key_applies_latest_key() {
        let mut mock_transport = MockHttpTransport::new();
        let mut seq = mockall::Sequence::new();
        mock_transport
            .expect_send()
            .withf(|request| header(request, AUTHORIZATION) == "Bearer first")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HttpResponse::new(StatusCode::OK, "")));
        mock_transport
            .expect_send()
            .withf(|request| header(request, AUTHORIZATION) == "Bearer third")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HttpResponse::new(StatusCode::OK, "")));

        let mut transport = AuthenticatedTransport::new("first", mock_transport);
        transport
            .fetch_with_auth("http://coordinator/game_servers", RequestOptions::get())
            .await
            .unwrap();

        transport.set_api_key("second");
        transport.set_api_key("third");
        transport
            .fetch_with_auth("http://coordinator/game_servers", RequestOptions::get())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalid_api_key_sends_nothing() {
        let mut mock_transport = MockHttpTransport::new();
        mock_transport.expect_send().times(0);

        let transport = AuthenticatedTransport::new("bad\nkey", mock_transport);
        let error = transport
            .fetch_with_auth("http://coordinator/game_servers", RequestOptions::get())
            .await
            .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ClientError>(),
            Some(ClientError::InvalidApiKey)
        ));
    }
}
