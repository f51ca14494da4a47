//! Connection Handler
//!
//! Handles individual client connections.
//!
//! ## Session States
//! ```text
//! AwaitingFrame ──frame──▶ Processing ──response sent──▶ AwaitingFrame
//!       │                      │
//!       │ EOF / I/O error      │ QUIT answered / write failed
//!       ▼                      ▼
//!     Closed ◀─────────────────┘
//! ```

use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::mem;
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::{BoardError, Result};
use crate::processor::CommandProcessor;
use crate::protocol::{write_response, Frame, FrameReader, FrameSource};

/// Where a session is in its request/reply cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the client's next frame
    AwaitingFrame,

    /// A frame has been read and must be answered
    Processing(Frame),

    /// Terminal; nothing more is read or written
    Closed,
}

/// Read timeouts end the session the same way a hang-up does
fn is_read_timeout(err: &BoardError) -> bool {
    matches!(err, BoardError::Io(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut))
}

/// One client's request/reply loop over any frame source and writer
pub struct Session<S, W> {
    source: S,
    writer: W,
    processor: CommandProcessor,

    /// Peer label for logging
    peer: String,

    state: SessionState,
}

impl<S: FrameSource, W: Write> Session<S, W> {
    /// Create a session in the `AwaitingFrame` state
    pub fn new(source: S, writer: W, processor: CommandProcessor, peer: impl Into<String>) -> Self {
        Self {
            source,
            writer,
            processor,
            peer: peer.into(),
            state: SessionState::AwaitingFrame,
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Check whether the session has terminated
    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    /// Borrow the response writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the session, returning the response writer
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Perform exactly one state transition
    ///
    /// Remote close is not an error: the session moves to `Closed` and
    /// `Ok(())` is returned. Other I/O errors close the session and are
    /// returned to the caller.
    pub fn step(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::AwaitingFrame => match self.source.read_frame() {
                Ok(Some(frame)) => {
                    tracing::trace!("Received frame from {}: {:?}", self.peer, frame);
                    self.state = SessionState::Processing(frame);
                    Ok(())
                }
                Ok(None) => {
                    tracing::debug!("Client {} disconnected", self.peer);
                    Ok(())
                }
                Err(e) if e.is_disconnect() => {
                    tracing::debug!("Connection to {} dropped: {}", self.peer, e);
                    Ok(())
                }
                Err(e) if is_read_timeout(&e) => {
                    tracing::debug!("Read timeout for client {}", self.peer);
                    Ok(())
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer, e);
                    Err(e)
                }
            },
            SessionState::Processing(frame) => {
                let reply = self.processor.process(frame);

                match write_response(&mut self.writer, &reply.response) {
                    Ok(()) if reply.close => {
                        tracing::debug!("Client {} sent QUIT", self.peer);
                        Ok(())
                    }
                    Ok(()) => {
                        self.state = SessionState::AwaitingFrame;
                        Ok(())
                    }
                    Err(e) if e.is_disconnect() => {
                        tracing::debug!(
                            "Client {} disconnected before response could be sent: {}",
                            self.peer,
                            e
                        );
                        Ok(())
                    }
                    Err(e) => {
                        tracing::warn!("Error writing to {}: {}", self.peer, e);
                        Err(e)
                    }
                }
            }
            SessionState::Closed => Ok(()),
        }
    }

    /// Drive the session until it closes
    pub fn run(&mut self) -> Result<()> {
        while !self.is_closed() {
            self.step()?;
        }
        Ok(())
    }
}

/// A session bound to a TCP stream
pub struct Connection {
    session: Session<FrameReader<BufReader<TcpStream>>, BufWriter<TcpStream>>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and applies the socket options from `config`
    pub fn new(stream: TcpStream, processor: CommandProcessor, config: &Config) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        let session = Session::new(
            FrameReader::new(BufReader::new(read_stream)),
            BufWriter::new(write_stream),
            processor,
            peer_addr.clone(),
        );

        Ok(Self { session, peer_addr })
    }

    /// Handle the connection (blocking until closed)
    pub fn handle(&mut self) -> Result<()> {
        tracing::info!("Client connected: {}", self.peer_addr);
        let result = self.session.run();
        tracing::info!("Client disconnected: {}", self.peer_addr);
        result
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
