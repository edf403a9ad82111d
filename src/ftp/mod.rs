//! Data-plane access to a server's filesystem over FTP.
//!
//! Each server exposes a plaintext FTP endpoint whose address and credentials
//! are part of its [`crate::coordinator::ServerHandle`]. Sessions are short lived:
//! one is opened per upload and closed right after it.
//!
//! # Test doubles
//!
//! [`MockFtpConnector`] and [`MockFtpSession`] are the [`mockall`] mocks of the
//! two traits. They are exported so that code uploading missions through this
//! crate can be tested without an FTP server:
//!
//! ```
//! use nimbus::ftp::{FtpConnector, FtpParams, FtpSession, MockFtpConnector, MockFtpSession};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut connector = MockFtpConnector::new();
//! connector.expect_connect().returning(|_| {
//!     let mut session = MockFtpSession::new();
//!     session.expect_close().returning(|| Ok(()));
//!     Ok(session)
//! });
//!
//! let params = FtpParams {
//!     host: "127.0.0.1".to_owned(),
//!     port: 21,
//!     username: "user".to_owned(),
//!     password: "secret".to_owned(),
//! };
//! let mut session = connector.connect(&params).await.unwrap();
//! session.close().await.unwrap();
//! # }
//! ```

mod session;

pub use crate::ftp::session::{
    FtpConnector, FtpParams, FtpSession, MISSIONS_DIR, SuppaFtpConnector, SuppaFtpSession,
};

/// Test doubles of [`FtpConnector`] and [`FtpSession`].
pub use crate::ftp::session::{MockFtpConnector, MockFtpSession};
