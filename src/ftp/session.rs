//! FTP sessions to a server's filesystem.
//!
//! This module provides the [`FtpConnector`] and [`FtpSession`] traits used by
//! the mission uploader, and their [suppaftp] based implementation.

use std::fmt;

use futures::io::Cursor;
use log::{debug, info};
use mockall::automock;
use suppaftp::{AsyncFtpStream, types::FileType};

use crate::coordinator::ServerHandle;

/// Top level directory holding the mission files of a server.
pub const MISSIONS_DIR: &str = "Missions";

/// Connection parameters of a server's FTP access.
#[derive(Clone, PartialEq, Eq)]
pub struct FtpParams {
    /// Server address
    pub host: String,
    /// FTP port
    pub port: u16,
    /// FTP user name
    pub username: String,
    /// FTP password
    pub password: String,
}

impl From<&ServerHandle> for FtpParams {
    fn from(server: &ServerHandle) -> Self {
        FtpParams {
            host: server.ip.to_owned(),
            port: server.ftp_port,
            username: server.ftp_username.to_owned(),
            password: server.ftp_password.to_owned(),
        }
    }
}

impl fmt::Debug for FtpParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FtpParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for FtpParams {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ftp://{}@{}:{}", self.username, self.host, self.port)
    }
}

/// An open, logged in FTP session.
///
/// A session is owned by a single upload and must be closed by its owner on
/// every exit path.
#[automock]
pub trait FtpSession {
    /// Makes `dir` the working directory, creating it first when missing.
    ///
    /// Calling it on an existing directory succeeds.
    async fn ensure_dir(&mut self, dir: &str) -> anyhow::Result<()>;
    /// Stores `content` as `filename` in the working directory, replacing any
    /// existing file. Returns the number of bytes written.
    async fn upload(&mut self, filename: &str, content: Vec<u8>) -> anyhow::Result<u64>;
    /// Logs out and closes the connection.
    async fn close(&mut self) -> anyhow::Result<()>;
}

/// Opens [`FtpSession`]s.
///
/// This trait is the substitution point for the data plane in tests.
#[automock(type Session = MockFtpSession;)]
pub trait FtpConnector {
    type Session: FtpSession;

    /// Connects and logs in with the credentials of `params`.
    async fn connect(&self, params: &FtpParams) -> anyhow::Result<Self::Session>;
}

/// [`FtpConnector`] opening plaintext FTP connections.
#[derive(Clone, Copy, Debug, Default)]
pub struct SuppaFtpConnector;

impl FtpConnector for SuppaFtpConnector {
    type Session = SuppaFtpSession;

    async fn connect(&self, params: &FtpParams) -> anyhow::Result<SuppaFtpSession> {
        info!("open ftp session {}", params);

        let address = format!("{}:{}", &params.host, params.port);
        let mut stream = AsyncFtpStream::connect(address.as_str()).await?;

        if let Err(e) = stream
            .login(params.username.as_str(), params.password.as_str())
            .await
        {
            // Release the control connection before reporting the failure
            let _ = stream.quit().await;
            return Err(e.into());
        }

        stream.transfer_type(FileType::Binary).await?;

        Ok(SuppaFtpSession { stream })
    }
}

/// FTP session opened by [`SuppaFtpConnector`].
///
/// Dropping the session without [`FtpSession::close`] shuts the socket down
/// without logging out.
pub struct SuppaFtpSession {
    /// FTP control connection
    stream: AsyncFtpStream,
}

impl FtpSession for SuppaFtpSession {
    async fn ensure_dir(&mut self, dir: &str) -> anyhow::Result<()> {
        if self.stream.cwd(dir).await.is_ok() {
            debug!("ftp directory {} exists", dir);
            return Ok(());
        }

        debug!("create ftp directory {}", dir);
        self.stream.mkdir(dir).await?;
        self.stream.cwd(dir).await?;

        Ok(())
    }

    async fn upload(&mut self, filename: &str, content: Vec<u8>) -> anyhow::Result<u64> {
        debug!("upload {} ({} bytes)", filename, content.len());

        let mut reader = Cursor::new(content);
        let written = self.stream.put_file(filename, &mut reader).await?;

        Ok(written)
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        debug!("close ftp session");
        self.stream.quit().await?;
        Ok(())
    }
}
