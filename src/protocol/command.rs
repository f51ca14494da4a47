//! Command definitions
//!
//! Represents commands parsed from client frames.

use super::Frame;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Post,
    Get,
    Delete,
    Quit,
    Unknown,
}

impl CommandType {
    /// Match a keyword, ignoring case
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_uppercase().as_str() {
            "POST" => CommandType::Post,
            "GET" => CommandType::Get,
            "DELETE" => CommandType::Delete,
            "QUIT" => CommandType::Quit,
            _ => CommandType::Unknown,
        }
    }

    /// Wire keyword for known commands
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            CommandType::Post => Some("POST"),
            CommandType::Get => Some("GET"),
            CommandType::Delete => Some("DELETE"),
            CommandType::Quit => Some("QUIT"),
            CommandType::Unknown => None,
        }
    }
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a message; content is the body joined with `\n`
    Post { content: String },

    /// List every message
    Get,

    /// Delete messages; one trimmed id per body line
    Delete { ids: Vec<String> },

    /// End the session
    Quit,

    /// Anything else, keyword kept as received
    Unknown { keyword: String },
}

impl Command {
    /// Interpret a frame
    ///
    /// Body lines are kept verbatim for POST and trimmed for DELETE.
    /// Blank DELETE lines stay in the list as empty ids.
    pub fn from_frame(frame: Frame) -> Self {
        match CommandType::from_keyword(&frame.command) {
            CommandType::Post => Command::Post {
                content: frame.body.join("\n"),
            },
            CommandType::Get => Command::Get,
            CommandType::Delete => Command::Delete {
                ids: frame.body.iter().map(|l| l.trim().to_string()).collect(),
            },
            CommandType::Quit => Command::Quit,
            CommandType::Unknown => Command::Unknown {
                keyword: frame.command,
            },
        }
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Post { .. } => CommandType::Post,
            Command::Get => CommandType::Get,
            Command::Delete { .. } => CommandType::Delete,
            Command::Quit => CommandType::Quit,
            Command::Unknown { .. } => CommandType::Unknown,
        }
    }
}
