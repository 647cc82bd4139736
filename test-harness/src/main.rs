//! Mock homeserver binary
//!
//! Runs the in-process mock homeserver standalone so `roomseed` can be
//! pointed at it by hand:
//!
//!   test-harness --port 8008 --password secret
//!   PUBLIC_BASEURL=http://127.0.0.1:8008 in compose/.env, then run roomseed

use anyhow::Result;
use clap::Parser;
use roomseed_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use roomseed_core::test_harness::{MockConfig, MockHomeserver};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "test-harness")]
#[command(about = "Mock Matrix homeserver for roomseed", long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8008")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server name used in generated room ids
    #[arg(long, default_value = "example.com")]
    server_name: String,

    /// Password accepted at login
    #[arg(long, default_value = "password")]
    password: String,

    /// Room names whose creation should fail (repeatable)
    #[arg(long = "fail-room")]
    fail_rooms: Vec<String>,

    /// Reject every login
    #[arg(long)]
    reject_logins: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging_with_config(LogConfig::new(LogLevel::Debug))?;

    let mut config = MockConfig::new(args.server_name, args.password);
    for name in args.fail_rooms {
        config = config.fail_room(name);
    }
    if args.reject_logins {
        config = config.reject_logins();
    }

    let server = MockHomeserver::bind(&format!("{}:{}", args.host, args.port), config).await?;
    info!("Serving the client-server API at {}", server.base_url());

    server.wait().await
}
