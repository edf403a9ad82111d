//! Configuration of the `nimbus` command line tool.
//!
//! The configuration is read from an optional YAML file, then overridden by
//! environment variables prefixed with `NIMBUS_`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! # Coordinator API key
//! api_key: "your-api-key"
//!
//! # Coordinator address, defaults to the public coordinator
//! base_url: "https://coordinator.nimbuspulse.com"
//!
//! # Request timeout in seconds, no timeout when absent
//! timeout: 30
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export NIMBUS_API_KEY="your-api-key"
//! export NIMBUS_BASE_URL="http://localhost:8080"
//! export NIMBUS_TIMEOUT=30
//! ```

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::coordinator::BASE_URL;

/// Root configuration of the command line tool.
#[derive(Deserialize)]
pub struct Config {
    /// Coordinator API key.
    pub api_key: String,

    /// Coordinator base URL.
    ///
    /// Should include the protocol (http/https), a trailing slash is ignored.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    ///
    /// Applied to every coordinator request. FTP transfers are not bounded.
    #[serde(default)]
    pub timeout: Option<u64>,
}

fn default_base_url() -> String {
    BASE_URL.to_owned()
}

impl Config {
    /// Loads the configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Optional YAML file, environment variables take precedence over it.
    ///
    /// # Errors
    ///
    /// Fails when the file can't be parsed or when `api_key` is set nowhere.
    /// A missing file is treated as empty.
    pub fn load(path: Option<&str>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        figment.merge(Env::prefixed("NIMBUS_")).extract()
    }

    /// Returns the request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
