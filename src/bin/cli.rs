//! msgboard CLI Client
//!
//! Interactive terminal client for the message board.

use std::io::{self, BufRead, Write};

use clap::error::ErrorKind;
use clap::Parser;
use msgboard::config::validate_port;
use msgboard::network::{read_block_lines, Client};
use msgboard::protocol::{CommandType, Response};
use msgboard::{BoardError, Config, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// msgboard CLI
#[derive(Parser, Debug)]
#[command(name = "msgboard-cli")]
#[command(about = "Message board client - TCP client for the online message board")]
#[command(version)]
struct Args {
    /// Server IP address or hostname
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port number
    #[arg(short, long, default_value = "9090")]
    port: u32,

    /// Receive buffer size in bytes
    #[arg(short, long, default_value = "4096")]
    buffer_size: i64,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).init();

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

    let config = Config::builder()
        .host_port(&args.host, port)
        .buffer_size(usize::try_from(args.buffer_size).unwrap_or(0))
        .build();
    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }

    let mut client = match Client::connect(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Connection failed: {}", e);
            return;
        }
    };

    if let Err(e) = run(&mut client) {
        tracing::error!("{}", e);
    }
    tracing::info!("Closing connection...");
}

/// The interactive loop; returns once QUIT is answered or the link fails
fn run(client: &mut Client) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("\nAvailable commands: POST, GET, DELETE, QUIT");
    println!("Enter command:");

    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            tracing::info!("EOF received, sending QUIT command");
            println!("{}", client.quit()?);
            return Ok(());
        }

        let keyword = line.trim();
        if keyword.is_empty() {
            continue;
        }

        let response = match CommandType::from_keyword(keyword) {
            CommandType::Post => {
                println!("Enter message content (end with '#' on a new line):");
                match read_block_lines(&mut input, false) {
                    Ok(lines) => client.post(&lines.join("\n"))?,
                    Err(BoardError::UnexpectedEndOfInput) => {
                        tracing::error!("Unexpected end of input");
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            CommandType::Delete => {
                println!("Enter message IDs to delete (one per line, end with '#'):");
                match read_block_lines(&mut input, true) {
                    Ok(ids) => client.delete(&ids)?,
                    Err(BoardError::UnexpectedEndOfInput) => {
                        tracing::error!("Unexpected end of input");
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }
            CommandType::Get => client.get()?,
            CommandType::Quit => {
                let response = client.quit()?;
                println!("{}", response);
                if response.trim() != Response::OK_TEXT {
                    tracing::error!("Unexpected response: {}", response);
                }
                return Ok(());
            }
            CommandType::Unknown => client.send_raw::<&str>(keyword, &[])?,
        };

        println!("{}", response.trim_end());
    }
}
