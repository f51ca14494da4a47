//! Protocol Module
//!
//! Defines the line-oriented text protocol between client and server.
//!
//! ## Frame Format
//!
//! ```text
//! Simple frame:   KEYWORD\n
//! Block frame:    KEYWORD\n
//!                 <body line>\n      (zero or more)
//!                 #\n                (terminator, trimmed content is "#")
//! ```
//!
//! ### Commands
//! - POST   - block frame, body is the message content
//! - GET    - simple frame
//! - DELETE - block frame, one message id per body line
//! - QUIT   - simple frame
//!
//! Keywords are matched case-insensitively; anything else is answered
//! with `ERROR - Command not understood`.
//!
//! ### Responses
//! - `OK`
//! - the message listing, or `No messages available.`
//! - `ERROR - Wrong ID`
//! - `ERROR - Command not understood`
//!
//! Every response is followed by a single `\n` on the wire.

mod frame;
mod command;
mod response;
mod codec;

pub use frame::{Frame, FrameReader, FrameSource, is_block_keyword, TERMINATOR};
pub use command::{Command, CommandType};
pub use response::Response;
pub use codec::{encode_frame, write_frame, encode_response, write_response};
