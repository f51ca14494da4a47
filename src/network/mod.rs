//! Network Module
//!
//! TCP server, per-connection sessions and the client.
//!
//! ## Architecture
//! - Single acceptor thread, blocks only on accept
//! - One session thread per accepted connection
//! - Commands routed through the CommandProcessor to the shared store

mod server;
mod connection;
mod client;

pub use server::Server;
pub use connection::{Connection, Session, SessionState};
pub use client::{read_block_lines, Client};
