//! Request payloads sent to the coordinator API.

use serde::Serialize;

use crate::coordinator::structs::{Billing, Terrain};

/// Arguments of a server creation.
///
/// # Examples
///
/// ```
/// use nimbus::coordinator::{Billing, NewServer, Terrain};
///
/// let server = NewServer {
///     name: "Training".to_owned(),
///     billing: Billing::Hourly,
///     password: None,
///     max_players: 16,
///     plan: "plan-id".to_owned(),
///     active_mods: vec![],
///     terrains: vec![Terrain::Caucasus],
///     use_voice_chat: true,
///     enable_io: false,
///     enable_os: false,
///     enable_lfs: false,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServer {
    /// Initial server name displayed in the DCS server browser
    pub name: String,
    /// Billing mode of the rental
    pub billing: Billing,
    /// Initial server password, no password when `None`
    pub password: Option<String>,
    /// Initial player cap
    pub max_players: u32,
    /// Product (plan) identifier
    pub plan: String,
    /// Identifiers of the mods to activate
    pub active_mods: Vec<String>,
    /// Terrains to install
    pub terrains: Vec<Terrain>,
    /// Enables the DCS voice chat server
    pub use_voice_chat: bool,
    /// Unsanitizes the `io` scripting module
    pub enable_io: bool,
    /// Unsanitizes the `os` scripting module
    pub enable_os: bool,
    /// Unsanitizes the `lfs` scripting module
    pub enable_lfs: bool,
}

/// Body of `POST /game_servers`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CreateServerRequest {
    pub product_id: String,
    pub billing: Billing,
    pub settings: ServerSettingsPayload,
    pub active_mods: Vec<String>,
    pub wanted_terrains: Vec<Terrain>,
}

/// Initial DCS settings of a created server.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ServerSettingsPayload {
    pub initial_server_name: String,
    pub initial_server_password: String,
    pub initial_max_players: u32,
    pub initial_use_voice_chat: bool,
    pub enable_io: bool,
    pub enable_os: bool,
    pub enable_lfs: bool,
}

impl From<NewServer> for CreateServerRequest {
    fn from(server: NewServer) -> Self {
        CreateServerRequest {
            product_id: server.plan,
            billing: server.billing,
            settings: ServerSettingsPayload {
                initial_server_name: server.name,
                initial_server_password: server.password.unwrap_or_default(),
                initial_max_players: server.max_players,
                initial_use_voice_chat: server.use_voice_chat,
                enable_io: server.enable_io,
                enable_os: server.enable_os,
                enable_lfs: server.enable_lfs,
            },
            active_mods: server.active_mods,
            wanted_terrains: server.terrains,
        }
    }
}
