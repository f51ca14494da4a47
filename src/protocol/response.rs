//! Response definitions
//!
//! Represents responses to clients.

use std::fmt;

/// A response to send to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `OK`
    Ok,

    /// GET result, sent verbatim (may be the no-messages sentinel)
    Listing(String),

    /// `ERROR - Wrong ID`
    WrongId,

    /// `ERROR - Command not understood`
    NotUnderstood,
}

impl Response {
    pub const OK_TEXT: &'static str = "OK";
    pub const WRONG_ID_TEXT: &'static str = "ERROR - Wrong ID";
    pub const NOT_UNDERSTOOD_TEXT: &'static str = "ERROR - Command not understood";

    /// The response text, without the wire terminator
    pub fn as_str(&self) -> &str {
        match self {
            Response::Ok => Self::OK_TEXT,
            Response::Listing(text) => text,
            Response::WrongId => Self::WRONG_ID_TEXT,
            Response::NotUnderstood => Self::NOT_UNDERSTOOD_TEXT,
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
