//! Nimbus - A client for hosted DCS game servers.
//!
//! This crate manages game server instances rented from a coordination service:
//! creating, listing, starting, stopping and deleting servers, controlling the
//! DCS runtime, and uploading mission files to a server.
//!
//! # Architecture
//!
//! - [`http`] - Authenticated HTTP transport, the single path of every coordinator call
//! - [`coordinator`] - Control-plane client: server lifecycle and mission registration
//! - [`ftp`] - Data-plane sessions to a server's filesystem
//! - [`mission`] - Mission files and the upload workflow
//! - [`config`] - Configuration of the `nimbus` command line tool
//!
//! A mission upload spans both planes:
//!
//! ```text
//! Client::upload_mission
//!      │
//!      ├── coordinator: GET /game_servers ─────────── find the server
//!      ├── ftp: connect, ensure Missions/, store file
//!      └── coordinator: POST .../dcs-api/missions ─── register the file name
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use nimbus::Client;
//! use nimbus::coordinator::{Billing, NewServer, Terrain};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Client::new("api-key");
//!
//! let server = client
//!     .create_server(NewServer {
//!         name: "Training".to_owned(),
//!         billing: Billing::Hourly,
//!         password: None,
//!         max_players: 16,
//!         plan: "plan-id".to_owned(),
//!         active_mods: vec![],
//!         terrains: vec![Terrain::Caucasus],
//!         use_voice_chat: false,
//!         enable_io: false,
//!         enable_os: false,
//!         enable_lfs: false,
//!     })
//!     .await?;
//!
//! client.upload_mission(&server.id, "/tmp/mission.miz").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: one `info` line per operation,
//! URLs and sizes at `debug`. Credentials are never logged.

// The traits are used in a single task and their futures don't need to be Send
#![allow(async_fn_in_trait)]

mod client;
pub mod config;
pub mod coordinator;
mod error;
pub mod ftp;
pub mod http;
pub mod mission;

pub use crate::client::Client;
pub use crate::error::ClientError;
