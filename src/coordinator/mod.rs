//! Control-plane client for the game server coordinator.
//!
//! This module covers the coordinator HTTP API: server lifecycle (create, list,
//! start, stop, delete), DCS runtime control and mission registration.
//!
//! # Modules
//!
//! - `requester` - The [`ControlPlane`] trait and its HTTP implementation
//! - `request_structs` - Payloads sent to the coordinator
//! - `response_structs` - Data structures decoded from coordinator responses
//! - `structs` - Enumerations shared by requests and responses
//!
//! # Examples
//!
//! ```no_run
//! use nimbus::coordinator::{ControlPlane, CoordinatorRequester};
//! use nimbus::http::ReqwestTransport;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let requester = CoordinatorRequester::new("api-key", ReqwestTransport::new());
//! for server in requester.get_servers().await? {
//!     requester.stop_server(&server.id).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Test doubles
//!
//! [`MockControlPlane`] is the [`mockall`] mock of [`ControlPlane`], exported
//! so that code built on this crate can be tested without a coordinator.

mod request_structs;
mod requester;
mod response_structs;
mod structs;

pub use crate::coordinator::request_structs::{
    CreateServerRequest, NewServer, ServerSettingsPayload,
};
pub use crate::coordinator::requester::{BASE_URL, ControlPlane, CoordinatorRequester};

/// Test double of [`ControlPlane`].
pub use crate::coordinator::requester::MockControlPlane;
pub use crate::coordinator::response_structs::{
    BannedPlayer, CpuMetric, CpuMetricData, DcsRuntime, DcsSettings, MissionInfo, MissionList,
    Player, Players, PlayersResponse, RamMetric, RamMetricData, ServerHandle, ServerResources,
    ServerSettings, ServerStatus, Settings, StoppedReason,
};
pub use crate::coordinator::structs::{Billing, Terrain};
