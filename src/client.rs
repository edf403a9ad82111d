//! High level client combining the coordinator API and FTP uploads.

use std::path::Path;

use crate::coordinator::{
    ControlPlane, CoordinatorRequester, DcsRuntime, NewServer, ServerHandle, ServerResources,
};
use crate::ftp::{FtpConnector, SuppaFtpConnector};
use crate::http::{HttpTransport, ReqwestTransport};
use crate::mission::MissionUploader;

/// Client managing the game servers of one API key.
///
/// Operations are sequential: each one runs to completion before its result is
/// returned, with a single attempt and no retry.
///
/// # Examples
///
/// ```no_run
/// use nimbus::Client;
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut client = Client::new("api-key");
/// let servers = client.get_servers().await?;
/// client.upload_mission(&servers[0].id, "/tmp/mission.miz").await?;
///
/// client.set_api_key("another-key");
/// # Ok(())
/// # }
/// ```
pub struct Client<T: HttpTransport = ReqwestTransport, F: FtpConnector = SuppaFtpConnector> {
    /// Coordinator API client
    requester: CoordinatorRequester<T>,
    /// Opens FTP sessions for mission uploads
    connector: F,
}

impl Client {
    /// Create a new [Client] for the public coordinator.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_parts(
            CoordinatorRequester::new(api_key, ReqwestTransport::new()),
            SuppaFtpConnector,
        )
    }

    /// Create a new [Client] for the coordinator at `url`.
    pub fn with_base_url(api_key: impl Into<String>, url: &str) -> Self {
        Self::with_parts(
            CoordinatorRequester::with_base_url(api_key, ReqwestTransport::new(), url),
            SuppaFtpConnector,
        )
    }
}

impl<T: HttpTransport, F: FtpConnector> Client<T, F> {
    /// Create a new [Client] from its collaborators.
    ///
    /// # Arguments
    ///
    /// * `requester` - Coordinator API client, holding the API key and HTTP transport.
    /// * `connector` - Opens the FTP sessions used by [`Self::upload_mission`].
    pub fn with_parts(requester: CoordinatorRequester<T>, connector: F) -> Self {
        Client {
            requester,
            connector,
        }
    }

    /// Replaces the API key used by the next calls.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.requester.set_api_key(api_key);
    }

    pub async fn create_server(&self, server: NewServer) -> anyhow::Result<ServerHandle> {
        self.requester.create_server(server).await
    }

    pub async fn get_servers(&self) -> anyhow::Result<Vec<ServerHandle>> {
        self.requester.get_servers().await
    }

    pub async fn start_server(&self, id: &str) -> anyhow::Result<()> {
        self.requester.start_server(id).await
    }

    pub async fn stop_server(&self, id: &str) -> anyhow::Result<()> {
        self.requester.stop_server(id).await
    }

    pub async fn delete_server(&self, id: &str) -> anyhow::Result<()> {
        self.requester.delete_server(id).await
    }

    pub async fn get_runtime(&self, id: &str) -> anyhow::Result<DcsRuntime> {
        self.requester.get_runtime(id).await
    }

    pub async fn get_server_resources(&self, id: &str) -> anyhow::Result<ServerResources> {
        self.requester.get_server_resources(id).await
    }

    /// Loads the mission at `mission_index` of the server's mission list.
    pub async fn start_mission(&self, id: &str, mission_index: u32) -> anyhow::Result<()> {
        self.requester.start_mission(id, mission_index).await
    }

    pub async fn pause_server(&self, id: &str) -> anyhow::Result<()> {
        self.requester.pause_server(id).await
    }

    pub async fn resume_server(&self, id: &str) -> anyhow::Result<()> {
        self.requester.resume_server(id).await
    }

    /// Uploads a mission file to the server `id` and registers it.
    ///
    /// See [`MissionUploader::upload`] for the steps and failure modes. A failure
    /// after the transfer leaves the file on the server unregistered.
    pub async fn upload_mission(
        &self,
        id: &str,
        mission_path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        MissionUploader::new(&self.requester, &self.connector)
            .upload(id, mission_path)
            .await
    }
}
