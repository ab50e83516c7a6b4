//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// CityTwin geodata API server.
#[derive(Debug, Clone, Parser)]
#[command(name = "citytwin", version, about)]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub listen_addr: SocketAddr,

    /// MongoDB connection URI.
    #[arg(long, default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// Database holding the digital twin collections.
    #[arg(long, default_value = "citytwin")]
    pub db_name: String,

    /// Directory containing the terrain, mesh and point-cloud tile trees.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Sensor registry definition file.
    #[arg(long, default_value = "sensors.yaml")]
    pub sensor_registry: PathBuf,

    /// Timeout for outbound sensor requests, in seconds.
    #[arg(long, default_value_t = 10)]
    pub sensor_timeout_secs: u64,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
