//! checkhost-relay CLI
//!
//! Deployment settings come from the environment; see [`checkhost_relay::config`].

use checkhost_relay::{run, Config};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(name = "checkhost-relay")]
#[command(about = "Relays Gatus alerts to check-host.net and posts the result link to Telegram")]
#[command(version)]
struct Args {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };
    tracing::debug!("Loaded configuration: {:?}", config);

    run(config).await?;

    Ok(())
}
