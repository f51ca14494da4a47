//! Client
//!
//! Blocking client for the message board protocol.

use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::{BoardError, Result};
use crate::protocol::{encode_frame, CommandType, TERMINATOR};
use crate::store::{NO_MESSAGES, SEPARATOR_WIDTH};

/// A connection to a message board server
pub struct Client {
    /// Write half
    stream: TcpStream,

    /// Read half, buffered with `Config::buffer_size` capacity
    reader: BufReader<TcpStream>,

    /// Closing line of every listing entry, `\n` included
    separator_line: String,
}

impl Client {
    /// Connect to `config.listen_addr`
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Attempting to connect to {}", config.listen_addr);
        let stream = TcpStream::connect(config.socket_addr()?)?;
        stream.set_nodelay(config.nodelay)?;
        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }
        tracing::info!("Connected to server successfully");

        let reader = BufReader::with_capacity(config.buffer_size, stream.try_clone()?);

        Ok(Self {
            stream,
            reader,
            separator_line: format!("{}\n", "-".repeat(SEPARATOR_WIDTH)),
        })
    }

    /// Post a message; content lines are sent as the block body
    ///
    /// A content line that trims to `#` would end the block early and
    /// is rejected before anything is sent.
    pub fn post(&mut self, content: &str) -> Result<String> {
        let lines: Vec<&str> = content.split('\n').collect();
        if lines.iter().any(|l| l.trim() == TERMINATOR) {
            return Err(BoardError::Protocol(format!(
                "message line {:?} would terminate the block",
                TERMINATOR
            )));
        }
        self.request(CommandType::Post, &lines)
    }

    /// Fetch the message listing
    pub fn get(&mut self) -> Result<String> {
        self.request::<&str>(CommandType::Get, &[])
    }

    /// Delete messages by id
    pub fn delete<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<String> {
        let ids: Vec<&str> = ids.iter().map(|id| id.as_ref().trim()).collect();
        self.request(CommandType::Delete, &ids)
    }

    /// Send QUIT; the server closes the connection after answering
    pub fn quit(&mut self) -> Result<String> {
        self.request::<&str>(CommandType::Quit, &[])
    }

    /// Send an arbitrary keyword with a body (body only used for POST/DELETE)
    pub fn send_raw<S: AsRef<str>>(&mut self, keyword: &str, body: &[S]) -> Result<String> {
        self.send(keyword, body)?;
        match CommandType::from_keyword(keyword) {
            CommandType::Get => self.receive_listing(),
            _ => self.receive_line(),
        }
    }

    fn request<S: AsRef<str>>(&mut self, command: CommandType, body: &[S]) -> Result<String> {
        let keyword = command
            .keyword()
            .ok_or_else(|| BoardError::Protocol("no keyword for unknown command".to_string()))?;
        self.send_raw(keyword, body)
    }

    fn send<S: AsRef<str>>(&mut self, keyword: &str, body: &[S]) -> Result<()> {
        self.stream.write_all(encode_frame(keyword, body).as_bytes())?;
        self.stream.flush()?;
        Ok(())
    }

    /// Read one `\n`-terminated line of the reply, terminator included
    fn read_reply_line(&mut self, out: &mut String) -> Result<()> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            tracing::info!("Server closed the connection");
            return Err(BoardError::ConnectionClosed);
        }

        let line = String::from_utf8(raw)
            .map_err(|e| BoardError::Protocol(format!("response is not UTF-8: {}", e)))?;
        out.push_str(&line);
        Ok(())
    }

    /// Receive a single-line reply (`OK` and the `ERROR - ...` replies)
    fn receive_line(&mut self) -> Result<String> {
        let mut reply = String::new();
        self.read_reply_line(&mut reply)?;
        Ok(reply.trim_end_matches(&['\n', '\r'][..]).to_string())
    }

    /// Receive a GET reply
    ///
    /// The reply is complete at the no-messages sentinel, or at a
    /// separator line with no further bytes pending. Replies are never
    /// pipelined, so pending bytes after a separator line belong to a
    /// message whose content holds a dash line of the same width.
    fn receive_listing(&mut self) -> Result<String> {
        let mut reply = String::new();
        loop {
            self.read_reply_line(&mut reply)?;

            if reply == format!("{}\n", NO_MESSAGES) {
                break;
            }
            if reply.ends_with(&self.separator_line) && !self.bytes_pending()? {
                break;
            }
        }

        reply.pop();
        Ok(reply)
    }

    /// Check for unread reply bytes without blocking
    fn bytes_pending(&self) -> Result<bool> {
        if !self.reader.buffer().is_empty() {
            return Ok(true);
        }

        self.stream.set_nonblocking(true)?;
        let mut byte = [0u8; 1];
        let pending = match self.stream.peek(&mut byte) {
            Ok(n) => Ok(n > 0),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(false),
            Err(e) => Err(e),
        };
        self.stream.set_nonblocking(false)?;

        Ok(pending?)
    }
}

/// Collect typed body lines up to a line that trims to `#`
///
/// With `trim` set each line is trimmed (DELETE ids). Reaching end of
/// input before the terminator is `BoardError::UnexpectedEndOfInput`;
/// only that command is abandoned.
pub fn read_block_lines<R: BufRead>(input: &mut R, trim: bool) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(BoardError::UnexpectedEndOfInput);
        }

        let content = line.trim_end_matches(&['\n', '\r'][..]);
        if content.trim() == TERMINATOR {
            return Ok(lines);
        }
        lines.push(if trim { content.trim() } else { content }.to_string());
    }
}
