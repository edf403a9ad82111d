//! Mission files and their upload to a server.
//!
//! # Modules
//!
//! - `file` - [`MissionFile`], a local mission file and its derived file name
//! - `uploader` - [`MissionUploader`], the lookup, transfer and registration workflow

mod file;
mod uploader;

pub use crate::mission::file::MissionFile;
pub use crate::mission::uploader::MissionUploader;
