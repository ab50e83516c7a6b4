use clap::Parser;

use citytwin_server::{telemetry, ServerConfig};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();
    telemetry::init_logging(&config.log_level);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting citytwin server"
    );
    if let Err(e) = citytwin_server::run(config).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
