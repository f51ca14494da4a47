//! TCP Server
//!
//! Accepts connections and spawns one session thread per client.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crate::config::Config;
use crate::error::Result;
use crate::network::Connection;
use crate::processor::CommandProcessor;
use crate::store::MessageStore;

/// TCP server for the message board
pub struct Server {
    config: Config,
    listener: TcpListener,
    local_addr: SocketAddr,
    processor: CommandProcessor,
    shutdown: AtomicBool,

    /// Sessions spawned so far, used for thread names
    sessions: AtomicU64,
}

impl Server {
    /// Bind the listening socket
    ///
    /// Failing to bind is the one fatal server error; it is returned
    /// to the caller.
    pub fn bind(config: Config, store: Arc<MessageStore>) -> Result<Self> {
        let addr = config.socket_addr()?;
        let listener = TcpListener::bind(addr)?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Server started on {}", local_addr);

        Ok(Self {
            config,
            listener,
            local_addr,
            processor: CommandProcessor::new(store),
            shutdown: AtomicBool::new(false),
            sessions: AtomicU64::new(0),
        })
    }

    /// The address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The store shared by every session
    pub fn store(&self) -> &Arc<MessageStore> {
        self.processor.store()
    }

    /// Accept connections until shutdown (blocking)
    ///
    /// Accept failures are logged and the loop continues.
    pub fn run(&self) -> Result<()> {
        tracing::info!("Waiting for connections...");

        for stream in self.listener.incoming() {
            if self.shutdown.load(Ordering::Acquire) {
                break;
            }

            match stream {
                Ok(stream) => self.spawn_session(stream),
                Err(e) => tracing::warn!("Failed to accept connection: {}", e),
            }
        }

        tracing::info!("Server shutting down");
        Ok(())
    }

    /// Start a session thread for an accepted stream
    fn spawn_session(&self, stream: TcpStream) {
        let n = self.sessions.fetch_add(1, Ordering::Relaxed);
        let processor = self.processor.clone();
        let config = self.config.clone();

        let spawned = thread::Builder::new()
            .name(format!("msgboard-session-{}", n))
            .spawn(move || {
                let mut connection = match Connection::new(stream, processor, &config) {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::warn!("Failed to set up connection: {}", e);
                        return;
                    }
                };
                if let Err(e) = connection.handle() {
                    tracing::warn!("Client {} error: {}", connection.peer_addr(), e);
                }
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn session thread: {}", e);
        }
    }

    /// Signal the accept loop to stop
    ///
    /// The loop is blocked in accept, so a throwaway connection is made
    /// to wake it.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        let _ = TcpStream::connect(self.local_addr);
    }
}
