//! Authenticated HTTP transport for the coordinator API.
//!
//! This module is the single choke point for every control-plane call. It is
//! split in two layers:
//!
//! - `transport` - The injectable [`HttpTransport`] primitive performing one raw
//!   HTTP exchange, with [`ReqwestTransport`] as the default implementation
//! - `auth` - The [`AuthenticatedTransport`] wrapper attaching the bearer token and
//!   JSON content type, and turning non-2xx responses into errors
//!
//! # Examples
//!
//! ```no_run
//! use nimbus::http::{AuthenticatedTransport, ReqwestTransport, RequestOptions};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let transport = AuthenticatedTransport::new("api-key", ReqwestTransport::new());
//! let response = transport
//!     .fetch_with_auth("https://coordinator.nimbuspulse.com/game_servers", RequestOptions::get())
//!     .await?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```
//!
//! # Test doubles
//!
//! [`MockHttpTransport`] is the [`mockall`] mock of [`HttpTransport`]. It is
//! exported so that code built on this crate can be tested without a network:
//!
//! ```
//! use nimbus::http::{AuthenticatedTransport, HttpResponse, MockHttpTransport, RequestOptions};
//! use reqwest::StatusCode;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut mock = MockHttpTransport::new();
//! mock.expect_send()
//!     .returning(|_| Ok(HttpResponse::new(StatusCode::OK, "[]")));
//!
//! let transport = AuthenticatedTransport::new("api-key", mock);
//! let response = transport
//!     .fetch_with_auth("http://coordinator/game_servers", RequestOptions::get())
//!     .await
//!     .unwrap();
//! assert_eq!(response.body, "[]");
//! # }
//! ```

mod auth;
mod transport;

pub use crate::http::auth::{AuthenticatedTransport, RequestOptions};
pub use crate::http::transport::{
    AuthenticatedRequest, HttpResponse, HttpTransport, ReqwestTransport,
};

/// Test double of [`HttpTransport`].
pub use crate::http::transport::MockHttpTransport;
