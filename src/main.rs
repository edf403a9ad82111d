//! Nimbus - Command line tool for hosted DCS game servers.
//!
//! # Configuration
//!
//! The API key and coordinator settings come from an optional YAML file and from
//! `NIMBUS_` environment variables, see [`nimbus::config`]:
//!
//! ```bash
//! export NIMBUS_API_KEY="your-api-key"
//! nimbus list
//! ```
//!
//! # Usage
//!
//! ```bash
//! nimbus --config config.yaml list
//! nimbus create --name "Training" --plan <plan-id> --terrain caucasus --terrain syria
//! nimbus upload <server-id> ./missions/training.miz
//! nimbus start-mission <server-id> 1
//! ```
//!
//! Results are printed as JSON on stdout.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};
use serde::Serialize;

use nimbus::{
    Client,
    config::Config,
    coordinator::{Billing, CoordinatorRequester, NewServer, Terrain},
    ftp::SuppaFtpConnector,
    http::ReqwestTransport,
};

/// Command-line arguments of the nimbus tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Optional when the API key is given with `NIMBUS_API_KEY`.
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the servers of the API key
    List,
    /// Rent a new server
    Create {
        /// Server name displayed in the DCS server browser
        #[arg(long)]
        name: String,
        /// Product (plan) identifier
        #[arg(long)]
        plan: String,
        /// Billing mode: hourly or monthly
        #[arg(long, default_value = "hourly")]
        billing: Billing,
        /// Server password
        #[arg(long)]
        password: Option<String>,
        /// Player cap
        #[arg(long, default_value_t = 16)]
        max_players: u32,
        /// Mod to activate, repeatable
        #[arg(long = "mod")]
        mods: Vec<String>,
        /// Terrain to install, repeatable
        #[arg(long = "terrain")]
        terrains: Vec<Terrain>,
        /// Enable the voice chat server
        #[arg(long)]
        voice_chat: bool,
        /// Unsanitize the io scripting module
        #[arg(long)]
        enable_io: bool,
        /// Unsanitize the os scripting module
        #[arg(long)]
        enable_os: bool,
        /// Unsanitize the lfs scripting module
        #[arg(long)]
        enable_lfs: bool,
    },
    /// Start a server
    Start { id: String },
    /// Stop a server
    Stop { id: String },
    /// Delete a server
    Delete { id: String },
    /// Upload a mission file to a server and register it
    Upload { id: String, path: String },
    /// Show the DCS runtime state of a server
    Runtime { id: String },
    /// Show the CPU and memory usage of a server
    Resources { id: String },
    /// Load a registered mission, by index in the mission list
    StartMission { id: String, index: u32 },
    /// Pause the running mission
    Pause { id: String },
    /// Resume the running mission
    Resume { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match build_client(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize client: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&client, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn build_client(config: &Config) -> anyhow::Result<Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let http_client = builder.build().context("failed to build http client")?;

    info!("using coordinator {}", &config.base_url);
    let requester = CoordinatorRequester::with_base_url(
        config.api_key.as_str(),
        ReqwestTransport::with_client(http_client),
        &config.base_url,
    );

    Ok(Client::with_parts(requester, SuppaFtpConnector))
}

async fn run(client: &Client, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => print_json(&client.get_servers().await?),
        Command::Create {
            name,
            plan,
            billing,
            password,
            max_players,
            mods,
            terrains,
            voice_chat,
            enable_io,
            enable_os,
            enable_lfs,
        } => {
            let server = client
                .create_server(NewServer {
                    name,
                    billing,
                    password,
                    max_players,
                    plan,
                    active_mods: mods,
                    terrains,
                    use_voice_chat: voice_chat,
                    enable_io,
                    enable_os,
                    enable_lfs,
                })
                .await?;
            print_json(&server)
        }
        Command::Start { id } => client.start_server(&id).await,
        Command::Stop { id } => client.stop_server(&id).await,
        Command::Delete { id } => client.delete_server(&id).await,
        Command::Upload { id, path } => client.upload_mission(&id, &path).await,
        Command::Runtime { id } => print_json(&client.get_runtime(&id).await?),
        Command::Resources { id } => print_json(&client.get_server_resources(&id).await?),
        Command::StartMission { id, index } => client.start_mission(&id, index).await,
        Command::Pause { id } => client.pause_server(&id).await,
        Command::Resume { id } => client.resume_server(&id).await,
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
