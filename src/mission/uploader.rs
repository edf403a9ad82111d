//! Mission upload workflow.
//!
//! This module defines the [`MissionUploader`], which chains the coordinator and
//! the server's FTP access into one upload:
//!
//! ```text
//! Resolving ──► Transferring ──► Registering ──► Done
//!     │              │                │
//!     └──────────────┴────────────────┴──► Failed
//! ```
//!
//! 1. **Resolving**: list the servers and pick the requested one
//! 2. **Transferring**: store the file in the server's `Missions` directory
//! 3. **Registering**: register the file name on the coordinator
//!
//! Each step needs the previous one to succeed. Nothing is rolled back: when the
//! registration fails, the file stays on the server without being registered and
//! the caller has to inspect the server.

use std::path::Path;

use log::{debug, info, warn};

use crate::coordinator::{ControlPlane, ServerHandle};
use crate::error::ClientError;
use crate::ftp::{FtpConnector, FtpParams, FtpSession, MISSIONS_DIR};
use crate::mission::file::MissionFile;

/// Uploads mission files to servers.
///
/// Concurrent uploads to the same server are not coordinated and must be
/// serialized by the caller.
///
/// # Examples
///
/// ```no_run
/// use nimbus::coordinator::CoordinatorRequester;
/// use nimbus::ftp::SuppaFtpConnector;
/// use nimbus::http::ReqwestTransport;
/// use nimbus::mission::MissionUploader;
///
/// # async fn example() -> anyhow::Result<()> {
/// let requester = CoordinatorRequester::new("api-key", ReqwestTransport::new());
/// let uploader = MissionUploader::new(&requester, &SuppaFtpConnector);
/// uploader.upload("server-id", "/tmp/mission.miz").await?;
/// # Ok(())
/// # }
/// ```
pub struct MissionUploader<'a, C: ControlPlane, F: FtpConnector> {
    /// Coordinator API
    control_plane: &'a C,
    /// Opens the FTP sessions
    connector: &'a F,
}

impl<'a, C: ControlPlane, F: FtpConnector> MissionUploader<'a, C, F> {
    /// Create a new [MissionUploader].
    ///
    /// # Arguments
    ///
    /// * `control_plane` - Used to find the server and register the mission.
    /// * `connector` - Used to open the FTP session to the server.
    pub fn new(control_plane: &'a C, connector: &'a F) -> Self {
        MissionUploader {
            control_plane,
            connector,
        }
    }

    /// Uploads the mission at `mission_path` to the server `server_id` and
    /// registers it.
    ///
    /// # Errors
    ///
    /// * [`ClientError::InvalidMissionPath`] if the path has no file name
    /// * [`ClientError::ServerNotFound`] if no listed server has this id; nothing
    ///   is transferred nor registered in that case
    /// * Coordinator, filesystem and FTP errors, unchanged
    pub async fn upload(
        &self,
        server_id: &str,
        mission_path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        let mission = MissionFile::new(mission_path)?;

        let server = self.resolve(server_id).await?;
        self.transfer(&server, &mission).await?;
        self.register(&server, &mission).await?;

        info!(
            "mission {} available on server {}",
            mission.filename(),
            &server.id
        );
        Ok(())
    }

    /// Finds the server `server_id` among the servers of the API key.
    async fn resolve(&self, server_id: &str) -> anyhow::Result<ServerHandle> {
        debug!("resolve server {}", server_id);

        self.control_plane
            .get_servers()
            .await?
            .into_iter()
            .find(|server| server.id == server_id)
            .ok_or_else(|| ClientError::ServerNotFound(server_id.to_owned()).into())
    }

    /// Stores the mission in the server's missions directory.
    ///
    /// The session is closed whatever the outcome of the transfer. If the future
    /// is dropped midway, dropping the session closes the connection.
    async fn transfer(
        &self,
        server: &ServerHandle,
        mission: &MissionFile,
    ) -> anyhow::Result<()> {
        let content = mission.read().await?;
        let params = FtpParams::from(server);
        info!(
            "transfer {} ({} bytes) to {}",
            mission.filename(),
            content.len(),
            &params
        );

        let mut session = self.connector.connect(&params).await?;
        let transferred = Self::write_mission(&mut session, mission.filename(), content).await;
        let closed = session.close().await;

        let written = transferred?;
        closed?;

        debug!("transferred {} bytes to server {}", written, &server.id);
        Ok(())
    }

    async fn write_mission(
        session: &mut F::Session,
        filename: &str,
        content: Vec<u8>,
    ) -> anyhow::Result<u64> {
        session.ensure_dir(MISSIONS_DIR).await?;
        session.upload(filename, content).await
    }

    /// Registers the transferred file name on the coordinator.
    async fn register(
        &self,
        server: &ServerHandle,
        mission: &MissionFile,
    ) -> anyhow::Result<()> {
        let result = self
            .control_plane
            .add_missions(&server.id, vec![mission.filename().to_owned()])
            .await;

        if let Err(e) = &result {
            warn!(
                "mission {} is on server {} but not registered: {}",
                mission.filename(),
                &server.id,
                e
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::MockControlPlane;
    use crate::ftp::{MockFtpConnector, MockFtpSession};
    use mockall::{Sequence, predicate::eq};
    use tempfile::TempDir;

    const CONTENT: &[u8] = b"PK\x03\x04 mission content";

    fn server(id: &str) -> ServerHandle {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "ip": "10.0.0.1",
            "ftp_username": "u",
            "ftp_password": "p",
            "ftp_port": 21
        }))
        .unwrap()
    }

    fn ftp_params() -> FtpParams {
        FtpParams {
            host: "10.0.0.1".to_owned(),
            port: 21,
            username: "u".to_owned(),
            password: "p".to_owned(),
        }
    }

    fn mission_file() -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mission.miz");
        std::fs::write(&path, CONTENT).unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_upload_steps_in_order() {
        let (_dir, path) = mission_file();
        let mut seq = Sequence::new();

        let mut control_plane = MockControlPlane::new();
        let mut connector = MockFtpConnector::new();
        let mut session = MockFtpSession::new();

        control_plane
            .expect_get_servers()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![server("s0"), server("s1")]));
        let connect = connector
            .expect_connect()
            .with(eq(ftp_params()))
            .times(1)
            .in_sequence(&mut seq);
        session
            .expect_ensure_dir()
            .with(eq("Missions"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        session
            .expect_upload()
            .with(eq("mission.miz"), eq(CONTENT.to_vec()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, content| Ok(content.len() as u64));
        session
            .expect_close()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        control_plane
            .expect_add_missions()
            .with(eq("s1"), eq(vec!["mission.miz".to_owned()]))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        connect.return_once(move |_| Ok(session));

        let uploader = MissionUploader::new(&control_plane, &connector);
        uploader.upload("s1", &path).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_server_has_no_side_effect() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s0")]));
        control_plane.expect_add_missions().times(0);

        let mut connector = MockFtpConnector::new();
        connector.expect_connect().times(0);

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert!(error.to_string().contains("not found"));
        assert!(matches!(
            error.downcast_ref::<ClientError>(),
            Some(ClientError::ServerNotFound(id)) if id == "s1"
        ));
    }

    #[tokio::test]
    async fn test_listing_failure_is_propagated() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("Failed request: Unauthorized")));
        control_plane.expect_add_missions().times(0);

        let mut connector = MockFtpConnector::new();
        connector.expect_connect().times(0);

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert_eq!(error.to_string(), "Failed request: Unauthorized");
    }

    #[tokio::test]
    async fn test_missing_local_file_opens_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.miz");

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s1")]));
        control_plane.expect_add_missions().times(0);

        let mut connector = MockFtpConnector::new();
        connector.expect_connect().times(0);

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert!(error.downcast_ref::<std::io::Error>().is_some());
    }

    #[tokio::test]
    async fn test_session_closed_when_upload_fails() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s1")]));
        control_plane.expect_add_missions().times(0);

        let mut session = MockFtpSession::new();
        session.expect_ensure_dir().times(1).returning(|_| Ok(()));
        session
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("552 quota exceeded")));
        session.expect_close().times(1).returning(|| Ok(()));

        let mut connector = MockFtpConnector::new();
        connector
            .expect_connect()
            .times(1)
            .return_once(move |_| Ok(session));

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert_eq!(error.to_string(), "552 quota exceeded");
    }

    #[tokio::test]
    async fn test_session_closed_when_directory_fails() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s1")]));
        control_plane.expect_add_missions().times(0);

        let mut session = MockFtpSession::new();
        session
            .expect_ensure_dir()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("550 permission denied")));
        session.expect_upload().times(0);
        session.expect_close().times(1).returning(|| Ok(()));

        let mut connector = MockFtpConnector::new();
        connector
            .expect_connect()
            .times(1)
            .return_once(move |_| Ok(session));

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert_eq!(error.to_string(), "550 permission denied");
    }

    #[tokio::test]
    async fn test_close_failure_after_transfer_is_reported() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s1")]));
        control_plane.expect_add_missions().times(0);

        let mut session = MockFtpSession::new();
        session.expect_ensure_dir().times(1).returning(|_| Ok(()));
        session
            .expect_upload()
            .times(1)
            .returning(|_, content| Ok(content.len() as u64));
        session
            .expect_close()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("connection reset")));

        let mut connector = MockFtpConnector::new();
        connector
            .expect_connect()
            .times(1)
            .return_once(move |_| Ok(session));

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert_eq!(error.to_string(), "connection reset");
    }

    #[tokio::test]
    async fn test_connection_failure_skips_registration() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s1")]));
        control_plane.expect_add_missions().times(0);

        let mut connector = MockFtpConnector::new();
        connector
            .expect_connect()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("530 login incorrect")));

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert_eq!(error.to_string(), "530 login incorrect");
    }

    #[tokio::test]
    async fn test_registration_failure_keeps_uploaded_file() {
        let (_dir, path) = mission_file();

        let mut control_plane = MockControlPlane::new();
        control_plane
            .expect_get_servers()
            .times(1)
            .returning(|| Ok(vec![server("s1")]));
        control_plane
            .expect_add_missions()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("Failed request: Internal Server Error")));

        // A single session: no second connection to clean the file up
        let mut session = MockFtpSession::new();
        session.expect_ensure_dir().times(1).returning(|_| Ok(()));
        session
            .expect_upload()
            .times(1)
            .returning(|_, content| Ok(content.len() as u64));
        session.expect_close().times(1).returning(|| Ok(()));

        let mut connector = MockFtpConnector::new();
        connector
            .expect_connect()
            .times(1)
            .return_once(move |_| Ok(session));

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", &path).await.unwrap_err();

        assert!(error.to_string().contains("Internal Server Error"));
    }

    #[tokio::test]
    async fn test_invalid_path_makes_no_call() {
        let mut control_plane = MockControlPlane::new();
        control_plane.expect_get_servers().times(0);

        let mut connector = MockFtpConnector::new();
        connector.expect_connect().times(0);

        let uploader = MissionUploader::new(&control_plane, &connector);
        let error = uploader.upload("s1", "/").await.unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ClientError>(),
            Some(ClientError::InvalidMissionPath(_))
        ));
    }
}
