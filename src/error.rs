//! Domain error kinds raised by the client.
//!
//! Every public operation returns an [`anyhow::Result`]. Errors coming from the
//! underlying crates (reqwest, serde_json, suppaftp, io) are propagated untouched,
//! while the conditions the client detects itself are reported with a
//! [`ClientError`] that callers can recover with `downcast_ref`.
//!
//! # Examples
//!
//! ```no_run
//! use nimbus::{Client, ClientError};
//!
//! # async fn example() {
//! let client = Client::new("api-key");
//! if let Err(e) = client.upload_mission("unknown", "/tmp/mission.miz").await {
//!     if let Some(ClientError::ServerNotFound(id)) = e.downcast_ref::<ClientError>() {
//!         println!("no server {}", id);
//!     }
//! }
//! # }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Errors detected by the client itself.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The coordinator answered with a status outside of the 2xx range.
    ///
    /// `status_text` is the reason phrase of the response, e.g. `Not Found`.
    #[error("Failed request: {status_text}")]
    Request {
        /// HTTP status code of the response
        status: StatusCode,
        /// Reason phrase of the response
        status_text: String,
    },

    /// The requested server id is not part of the servers visible to the API key.
    #[error("Server with id {0} not found")]
    ServerNotFound(String),

    /// The mission path has no final file name segment (e.g. `/` or `..`).
    #[error("Invalid mission path: {0}")]
    InvalidMissionPath(String),

    /// The API key contains characters that can't be sent in an HTTP header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
}
