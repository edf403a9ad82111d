//! Response structures for coordinator API endpoints.
//!
//! Only the fields the client relies on are mandatory. Everything else is
//! optional or defaulted so that the coordinator can evolve its payloads without
//! breaking decoding.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::coordinator::structs::Terrain;

/// A game server instance, as listed by `GET /game_servers`.
///
/// The FTP fields give access to the server's filesystem, see
/// [`crate::ftp::FtpParams`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerHandle {
    /// Opaque server identifier
    pub id: String,
    /// Public address of the server
    pub ip: String,
    /// FTP port on `ip`
    pub ftp_port: u16,
    /// FTP user name
    pub ftp_username: String,
    /// FTP password
    pub ftp_password: String,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    /// DCS game port
    #[serde(default)]
    pub port: Option<u16>,
    /// DCS web GUI port
    #[serde(default)]
    pub webgui_port: Option<u16>,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub status: Option<ServerStatus>,
    #[serde(default)]
    pub want_delete: bool,
    #[serde(default)]
    pub wanted_terrains: Vec<Terrain>,
    /// Unix timestamp of the rental
    #[serde(default)]
    pub rented_at: Option<u64>,
    #[serde(default)]
    pub active_mods: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub dcs_settings: Option<DcsSettings>,
}

/// Lifecycle state of a server, as reported by the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServerStatus {
    InstallingBaseGame {
        progress: Option<u8>,
    },
    InstallingTerrains {
        installed: Vec<Terrain>,
        processing: Option<Terrain>,
        processing_progress: Option<u8>,
    },
    InstallingMods,
    InstallingPost,
    ServerStarted,
    ServerStopped {
        was_error: bool,
        reason: StoppedReason,
    },
    ServerExpired,
    ServerDeleted,
    WantServerStarted {
        current_try: u32,
    },
    WantServerStopped {
        #[serde(default)]
        error_passthrough: Option<(bool, StoppedReason)>,
    },
    WantUpdateServer,
}

/// Why a server stopped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StoppedReason {
    StoppedNormally,
    StoppedUnexpectedly,
    MaxTriesReached,
}

/// DCS settings the server was created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DcsSettings {
    pub server_name: String,
    #[serde(default)]
    pub server_password: String,
    pub max_players: u32,
    #[serde(default)]
    pub use_voice_chat: bool,
}

/// Live state of the DCS process, from `GET /game_servers/{id}/runtime`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcsRuntime {
    pub paused: bool,
    pub mission_info: Option<MissionInfo>,
    pub mission_list: Option<MissionList>,
    pub players: Option<PlayersResponse>,
    pub settings: Option<ServerSettings>,
}

/// The mission currently loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionInfo {
    pub result_red: Option<i32>,
    pub result_blue: Option<i32>,
    pub mission_filename: String,
    pub mission_time: f32,
    pub mission_name: String,
    pub mission_description: String,
}

/// Missions registered on the server, in rotation order.
///
/// The index of a mission in `mission_list` is the one expected by
/// `start_mission`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionList {
    #[serde(rename = "missionList", deserialize_with = "deserialize_string_list")]
    pub mission_list: Vec<String>,
    #[serde(
        rename = "missionTheatres",
        default,
        deserialize_with = "deserialize_string_list"
    )]
    pub mission_theatres: Vec<String>,
    #[serde(rename = "listStartIndex")]
    pub list_start_index: i32,
    #[serde(rename = "listShuffle")]
    pub list_shuffle: bool,
    #[serde(rename = "listLoop")]
    pub list_loop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Players,
    pub server_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Players {
    #[serde(deserialize_with = "deserialize_object_list")]
    pub banned: Vec<BannedPlayer>,
    pub all: HashMap<String, Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannedPlayer {
    pub banned_from: i64,
    pub banned_until: i64,
    pub ipaddr: String,
    pub name: String,
    pub reason: String,
    pub ucid: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub ucid: String,
    pub side: i32,
    pub slot: String,
    pub ping: i32,
    pub score: i32,
    pub started: bool,
    pub lang: String,
    pub ipaddr: String,
}

/// DCS `serverSettings.lua` content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub mission_list: MissionList,
    pub settings: Settings,
    pub ip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub name: String,
    pub description: String,
    pub password: String,
    pub port: i32,
    pub mode: i32,
    pub bind_address: String,
    #[serde(rename = "isPublic")]
    pub is_public: bool,
    #[serde(rename = "maxPlayers")]
    pub max_players: i32,
    #[serde(rename = "missionList", deserialize_with = "deserialize_string_list")]
    pub mission_list: Vec<String>,
    #[serde(rename = "listStartIndex")]
    pub list_start_index: i32,
    #[serde(rename = "listShuffle")]
    pub list_shuffle: bool,
    #[serde(rename = "listLoop")]
    pub list_loop: bool,
    pub require_pure_textures: bool,
    pub require_pure_scripts: bool,
    pub require_pure_clients: bool,
    pub require_pure_models: bool,
    /// `advanced` table, kept as raw JSON
    #[serde(default)]
    pub advanced: Value,
}

/// CPU and memory usage series, from `GET /game_servers/{id}/resources`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerResources {
    pub cpus: Vec<CpuMetric>,
    pub max_ram: u64,
    pub ram: Vec<RamMetric>,
}

/// Usage series of one core, `values` are `(unix time, value)` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuMetric {
    pub metric: CpuMetricData,
    pub values: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuMetricData {
    pub core: String,
}

/// Memory series, `values` are `(unix time, value)` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamMetric {
    pub metric: RamMetricData,
    pub values: Vec<(f64, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamMetricData {
    pub instance: String,
    pub job: String,
    pub monitor: String,
    pub vm_uuid: String,
}

/// DCS serializes empty Lua tables as `{}`: accept an array or an empty object.
fn deserialize_object_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            serde_json::from_value(Value::Array(items)).map_err(serde::de::Error::custom)
        }
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        _ => Err(serde::de::Error::custom(
            "expected an array or an empty object",
        )),
    }
}

/// Same as [`deserialize_object_list`] for lists of strings; non-string items are skipped.
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|v| v.as_str().map(|s| s.to_owned()))
            .collect()),
        Value::Object(_) => Ok(Vec::new()),
        _ => Err(serde::de::Error::custom("expected a list of strings")),
    }
}
