use anyhow::Result;
use clap::Parser;
use roomseed_core::config::DEFAULT_ENV_FILE;
use roomseed_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use roomseed_core::{bootstrap, BootstrapConfig, BootstrapReport, MatrixClient, RoomStatus};
use std::path::PathBuf;
use tracing::{info, warn};

/// Create the default community space and rooms on a fresh homeserver
#[derive(Parser, Debug)]
#[command(name = "roomseed")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Env file holding PUBLIC_BASEURL, ADMIN_USER, ADMIN_PASSWORD and SYNAPSE_SERVER_NAME
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.parse::<LogLevel>().unwrap_or_else(|e| {
        eprintln!("{}, using 'info'", e);
        LogLevel::Info
    });

    init_logging_with_config(LogConfig::new(log_level).json_format(args.json_logs))?;

    let config = BootstrapConfig::from_env_file(&args.env_file)?;
    let mut client = MatrixClient::new(&config.homeserver)?;

    let report = bootstrap(&mut client, &config).await?;
    summarize(&report);

    Ok(())
}

fn summarize(report: &BootstrapReport) {
    for room in report.failures() {
        match &room.status {
            RoomStatus::Failed { error } => warn!("#{} was not created: {}", room.name, error),
            RoomStatus::Unlinked { room_id, error } => {
                warn!("#{} ({}) is not linked to the space: {}", room.name, room_id, error)
            }
            RoomStatus::Linked { .. } => {}
        }
    }

    info!(
        "Done! Space and {} rooms created ({} of {} linked). Space: {}",
        report.created_count(),
        report.linked_count(),
        report.rooms.len(),
        report.space_id
    );
    info!("Share the space invite with your community members.");
}
