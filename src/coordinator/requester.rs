//! Typed client for the coordinator API.
//!
//! This module provides the [`CoordinatorRequester`] struct, performing every
//! control-plane call through an [`AuthenticatedTransport`].

use anyhow::anyhow;
use log::{debug, info};
use mockall::automock;
use reqwest::Url;

use crate::coordinator::request_structs::{CreateServerRequest, NewServer};
use crate::coordinator::response_structs::{DcsRuntime, ServerHandle, ServerResources};
use crate::http::{AuthenticatedTransport, HttpTransport, RequestOptions};

/// Public coordinator address.
pub const BASE_URL: &str = "https://coordinator.nimbuspulse.com";

/// Control-plane operations of the coordinator.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
/// Every failure of the transport is propagated unchanged, and a success body
/// that can't be decoded is reported as a [`serde_json::Error`].
#[automock]
pub trait ControlPlane {
    /// Creates a server and returns it as answered by the coordinator.
    async fn create_server(&self, server: NewServer) -> anyhow::Result<ServerHandle>;
    /// Lists every server visible to the API key.
    async fn get_servers(&self) -> anyhow::Result<Vec<ServerHandle>>;
    async fn start_server(&self, id: &str) -> anyhow::Result<()>;
    async fn stop_server(&self, id: &str) -> anyhow::Result<()>;
    async fn delete_server(&self, id: &str) -> anyhow::Result<()>;
    /// Registers uploaded mission files, by file name, on a server.
    async fn add_missions(&self, id: &str, missions: Vec<String>) -> anyhow::Result<()>;
    async fn get_runtime(&self, id: &str) -> anyhow::Result<DcsRuntime>;
    async fn get_server_resources(&self, id: &str) -> anyhow::Result<ServerResources>;
    /// Loads the mission at `mission_index` of the server's mission list.
    async fn start_mission(&self, id: &str, mission_index: u32) -> anyhow::Result<()>;
    async fn pause_server(&self, id: &str) -> anyhow::Result<()>;
    async fn resume_server(&self, id: &str) -> anyhow::Result<()>;
}

/// HTTP client for the coordinator API.
///
/// # Examples
///
/// ```no_run
/// use nimbus::coordinator::{ControlPlane, CoordinatorRequester};
/// use nimbus::http::ReqwestTransport;
///
/// # async fn example() -> anyhow::Result<()> {
/// let requester = CoordinatorRequester::new("api-key", ReqwestTransport::new());
/// let servers = requester.get_servers().await?;
/// println!("Servers: {:?}", servers);
/// # Ok(())
/// # }
/// ```
pub struct CoordinatorRequester<T: HttpTransport> {
    /// Authenticated HTTP transport
    transport: AuthenticatedTransport<T>,
    /// Coordinator base url, without trailing slash
    url: String,
}

impl<T: HttpTransport> CoordinatorRequester<T> {
    /// Create a new [CoordinatorRequester] targeting [`BASE_URL`].
    ///
    /// # Arguments
    ///
    /// * `api_key` - The coordinator API key.
    /// * `transport` - The HTTP primitive performing the exchanges.
    pub fn new(api_key: impl Into<String>, transport: T) -> Self {
        Self::with_base_url(api_key, transport, BASE_URL)
    }

    /// Create a new [CoordinatorRequester] targeting another coordinator.
    ///
    /// A trailing slash of `url` is ignored.
    pub fn with_base_url(api_key: impl Into<String>, transport: T, url: &str) -> Self {
        CoordinatorRequester {
            transport: AuthenticatedTransport::new(api_key, transport),
            url: url.trim_end_matches('/').to_owned(),
        }
    }

    /// Replaces the API key used by the next requests.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.transport.set_api_key(api_key);
    }

    /// Url of `/game_servers/{id}` followed by `segments`.
    ///
    /// The id is percent-encoded as a single path segment.
    fn server_url(&self, id: &str, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("{} is not a valid base url", &self.url))?
            .pop_if_empty()
            .push("game_servers")
            .push(id)
            .extend(segments);
        Ok(url)
    }
}

impl<T: HttpTransport> ControlPlane for CoordinatorRequester<T> {
    /// Request `POST /game_servers`.
    ///
    /// The body is a [`CreateServerRequest`] built from `server`, the missing
    /// password being sent as an empty string.
    async fn create_server(&self, server: NewServer) -> anyhow::Result<ServerHandle> {
        let url = format!("{}/game_servers", &self.url);
        info!("create server {}", &server.name);

        let payload = serde_json::to_string(&CreateServerRequest::from(server))?;
        let response = self
            .transport
            .fetch_with_auth(&url, RequestOptions::post().with_body(payload))
            .await?;

        let server: ServerHandle = response.json()?;
        info!("created server {}", &server.id);

        Ok(server)
    }

    /// Request `GET /game_servers`.
    async fn get_servers(&self) -> anyhow::Result<Vec<ServerHandle>> {
        let url = format!("{}/game_servers", &self.url);
        info!("request servers");

        let response = self
            .transport
            .fetch_with_auth(&url, RequestOptions::get())
            .await?;
        let servers: Vec<ServerHandle> = response.json()?;

        debug!(
            "response from {} -> {:?}",
            &url,
            servers.iter().map(|s| &s.id).collect::<Vec<_>>()
        );

        Ok(servers)
    }

    /// Request `POST /game_servers/{id}/start`.
    async fn start_server(&self, id: &str) -> anyhow::Result<()> {
        info!("start server {}", id);
        let url = self.server_url(id, &["start"])?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::post())
            .await?;
        Ok(())
    }

    /// Request `POST /game_servers/{id}/stop`.
    async fn stop_server(&self, id: &str) -> anyhow::Result<()> {
        info!("stop server {}", id);
        let url = self.server_url(id, &["stop"])?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::post())
            .await?;
        Ok(())
    }

    /// Request `DELETE /game_servers/{id}`.
    async fn delete_server(&self, id: &str) -> anyhow::Result<()> {
        info!("delete server {}", id);
        let url = self.server_url(id, &[])?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::delete())
            .await?;
        Ok(())
    }

    /// Request `POST /game_servers/{id}/dcs-api/missions` with a JSON array of file names:
    /// ```json
    /// ["mission.miz"]
    /// ```
    async fn add_missions(&self, id: &str, missions: Vec<String>) -> anyhow::Result<()> {
        info!("register missions {:?} on server {}", &missions, id);

        let url = self.server_url(id, &["dcs-api", "missions"])?;
        let payload = serde_json::to_string(&missions)?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::post().with_body(payload))
            .await?;
        Ok(())
    }

    /// Request `GET /game_servers/{id}/runtime`.
    async fn get_runtime(&self, id: &str) -> anyhow::Result<DcsRuntime> {
        info!("request runtime of server {}", id);
        let url = self.server_url(id, &["runtime"])?;
        let response = self
            .transport
            .fetch_with_auth(url.as_str(), RequestOptions::get())
            .await?;
        Ok(response.json()?)
    }

    /// Request `GET /game_servers/{id}/resources`.
    async fn get_server_resources(&self, id: &str) -> anyhow::Result<ServerResources> {
        info!("request resources of server {}", id);
        let url = self.server_url(id, &["resources"])?;
        let response = self
            .transport
            .fetch_with_auth(url.as_str(), RequestOptions::get())
            .await?;
        Ok(response.json()?)
    }

    /// Request `POST /game_servers/{id}/dcs-api/missions/{mission_index}/start`.
    async fn start_mission(&self, id: &str, mission_index: u32) -> anyhow::Result<()> {
        info!("start mission {} on server {}", mission_index, id);
        let index = mission_index.to_string();
        let url = self.server_url(id, &["dcs-api", "missions", index.as_str(), "start"])?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::post())
            .await?;
        Ok(())
    }

    /// Request `POST /game_servers/{id}/dcs-api/pause`.
    async fn pause_server(&self, id: &str) -> anyhow::Result<()> {
        info!("pause server {}", id);
        let url = self.server_url(id, &["dcs-api", "pause"])?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::post())
            .await?;
        Ok(())
    }

    /// Request `POST /game_servers/{id}/dcs-api/resume`.
    async fn resume_server(&self, id: &str) -> anyhow::Result<()> {
        info!("resume server {}", id);
        let url = self.server_url(id, &["dcs-api", "resume"])?;
        self.transport
            .fetch_with_auth(url.as_str(), RequestOptions::post())
            .await?;
        Ok(())
    }
}
