//! Local mission files.

use std::path::{Path, PathBuf};

use crate::error::ClientError;

/// A mission file on the local filesystem.
///
/// The file name (last path segment, extension included) is the name the file
/// gets on the server and the name registered on the coordinator, which indexes
/// missions by file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionFile {
    /// Local path
    path: PathBuf,
    /// Last segment of `path`
    filename: String,
}

impl MissionFile {
    /// Create a new [MissionFile].
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidMissionPath`] when `path` has no file name (`/`, `..`)
    /// or when the name is not valid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use nimbus::mission::MissionFile;
    ///
    /// let mission = MissionFile::new("/tmp/mission.miz").unwrap();
    /// assert_eq!(mission.filename(), "mission.miz");
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ClientError::InvalidMissionPath(path.display().to_string()))?;

        Ok(MissionFile {
            filename: filename.to_owned(),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Reads the whole file.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}
