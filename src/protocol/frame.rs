//! Frame reader
//!
//! Splits a connection's byte stream into command frames.

use std::io::BufRead;

use crate::error::Result;

/// Body terminator line (compared after trimming)
pub const TERMINATOR: &str = "#";

/// Keywords whose frames carry a `#`-terminated body
const BLOCK_KEYWORDS: [&str; 2] = ["POST", "DELETE"];

/// Check whether a (normalized) keyword introduces a block frame
pub fn is_block_keyword(keyword: &str) -> bool {
    BLOCK_KEYWORDS.contains(&keyword)
}

/// One protocol message: the command line plus its body lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Command line with surrounding whitespace trimmed, case preserved
    pub command: String,

    /// Body lines, terminator excluded; empty for simple frames
    pub body: Vec<String>,
}

impl Frame {
    /// Build a frame from a command line and body lines
    pub fn new(command: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            command: command.into(),
            body,
        }
    }

    /// Build a frame with no body
    pub fn simple(command: impl Into<String>) -> Self {
        Self::new(command, Vec::new())
    }

    /// The command keyword, uppercased for matching
    pub fn keyword(&self) -> String {
        self.command.to_uppercase()
    }
}

/// Anything that yields frames: a socket reader or a test double
pub trait FrameSource {
    /// Read the next frame
    ///
    /// Returns `Ok(None)` when the peer closed the stream.
    fn read_frame(&mut self) -> Result<Option<Frame>>;
}

/// Reads frames from a buffered byte stream
pub struct FrameReader<R> {
    reader: R,

    /// Reused line buffer
    line: Vec<u8>,
}

impl<R: BufRead> FrameReader<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }

    /// Read one line without its `\n` / `\r\n` terminator
    ///
    /// A zero-byte read is end of stream (`None`), which is distinct
    /// from an empty line (`Some("")`). Invalid UTF-8 is replaced
    /// rather than rejected, so it surfaces as an unknown command.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.line.clear();
        let n = self.reader.read_until(b'\n', &mut self.line)?;
        if n == 0 {
            return Ok(None);
        }

        if self.line.last() == Some(&b'\n') {
            self.line.pop();
            if self.line.last() == Some(&b'\r') {
                self.line.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.line).into_owned()))
    }
}

impl<R: BufRead> FrameSource for FrameReader<R> {
    fn read_frame(&mut self) -> Result<Option<Frame>> {
        let command = match self.read_line()? {
            Some(line) => line.trim().to_string(),
            None => return Ok(None),
        };

        let mut frame = Frame::simple(command);
        if !is_block_keyword(&frame.keyword()) {
            return Ok(Some(frame));
        }

        loop {
            match self.read_line()? {
                Some(line) if line.trim() == TERMINATOR => break,
                Some(line) => frame.body.push(line),
                None => {
                    // Peer hung up mid-block; the partial frame is dropped.
                    tracing::debug!(
                        "Stream ended inside {} block after {} lines",
                        frame.command,
                        frame.body.len()
                    );
                    return Ok(None);
                }
            }
        }

        Ok(Some(frame))
    }
}
