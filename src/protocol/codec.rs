//! Protocol codec
//!
//! Encoding helpers for both directions of the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! POST\n<line>\n...#\n
//! GET\n
//! DELETE\n<id>\n...#\n
//! QUIT\n
//! ```
//!
//! ### Response
//! ```text
//! <response text>\n
//! ```

use std::io::Write;

use super::{is_block_keyword, Response, TERMINATOR};
use crate::error::Result;

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request frame
///
/// The keyword is uppercased. Block keywords (POST, DELETE) get their
/// body lines and the `#` terminator; any other keyword is sent alone
/// and `body` is ignored.
pub fn encode_frame<S: AsRef<str>>(keyword: &str, body: &[S]) -> String {
    let keyword = keyword.trim().to_uppercase();

    let mut out = String::with_capacity(keyword.len() + 1);
    out.push_str(&keyword);
    out.push('\n');

    if is_block_keyword(&keyword) {
        for line in body {
            out.push_str(line.as_ref());
            out.push('\n');
        }
        out.push_str(TERMINATOR);
        out.push('\n');
    }

    out
}

/// Write a request frame to a stream
pub fn write_frame<W: Write, S: AsRef<str>>(writer: &mut W, keyword: &str, body: &[S]) -> Result<()> {
    writer.write_all(encode_frame(keyword, body).as_bytes())?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Encoding
// =============================================================================

/// Encode a response: its text followed by `\n`
pub fn encode_response(response: &Response) -> Vec<u8> {
    let text = response.as_str();
    let mut message = Vec::with_capacity(text.len() + 1);
    message.extend_from_slice(text.as_bytes());
    message.push(b'\n');
    message
}

/// Write a response to a stream and flush it
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(&encode_response(response))?;
    writer.flush()?;
    Ok(())
}
