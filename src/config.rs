//! Configuration for msgboard
//!
//! Centralized configuration with sensible defaults, shared by the
//! server and the client.

use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{BoardError, Result};

/// Main configuration for a msgboard server or client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP address (host:port): bind address for the server,
    /// connect address for the client
    pub listen_addr: String,

    /// Disable Nagle's algorithm on accepted/connected sockets
    pub nodelay: bool,

    /// Connection read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Client Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the client's receive buffer (bytes)
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:9090".to_string(),
            nodelay: true,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            buffer_size: 4096,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the settings that the command line can get wrong
    ///
    /// Port 0 (ephemeral) is allowed here; the binaries reject it with
    /// `validate_port` before building a config.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(BoardError::Config(format!(
                "Invalid buffer size: {}. Must be positive.",
                self.buffer_size
            )));
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Resolve `listen_addr` to the first matching socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr
            .to_socket_addrs()
            .map_err(|e| BoardError::Config(format!("Invalid address {}: {}", self.listen_addr, e)))?
            .next()
            .ok_or_else(|| BoardError::Config(format!("Address {} did not resolve", self.listen_addr)))
    }
}

/// Validate a port number given on the command line
pub fn validate_port(port: u32) -> Result<u16> {
    match u16::try_from(port) {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(BoardError::Config(format!(
            "Invalid port number: {}. Must be between 1 and 65535.",
            port
        ))),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the TCP address (host:port)
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the address from separate host and port
    ///
    /// IPv6 literals are bracketed (`[::1]:9090`); hosts given already
    /// bracketed are kept as they are.
    pub fn host_port(mut self, host: &str, port: u16) -> Self {
        self.config.listen_addr = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        };
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Set the client receive buffer size (in bytes)
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config.buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
