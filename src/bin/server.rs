//! msgboard Server Binary
//!
//! Starts the TCP server for the message board.

use std::sync::Arc;

use clap::error::ErrorKind;
use clap::Parser;
use msgboard::config::validate_port;
use msgboard::network::Server;
use msgboard::{Config, MessageStore};
use tracing_subscriber::{fmt, EnvFilter};

/// msgboard Server
#[derive(Parser, Debug)]
#[command(name = "msgboard-server")]
#[command(about = "Message board server")]
#[command(version)]
struct Args {
    /// Server bind address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port number
    #[arg(short, long, default_value = "9090")]
    port: u32,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,msgboard=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let port = match validate_port(args.port) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("msgboard server v{}", msgboard::VERSION);

    let config = Config::builder().host_port(&args.host, port).build();

    let server = match Server::bind(config, Arc::new(MessageStore::new())) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
