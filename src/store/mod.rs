//! Store Module
//!
//! Shared in-memory message storage.
//!
//! ## Responsibilities
//! - Assign monotonically increasing, never reused ids
//! - Render the full listing in ascending id order
//! - Delete several ids at once, all or nothing
//!
//! ## Data Structure Choice
//! A BTreeMap behind a single parking_lot Mutex:
//! - Ids are fixed-width zero-padded, so key order is numeric order
//!   until the counter passes 9999 (see `board::id_order`)
//! - Every public operation is one critical section

mod board;

pub use board::{MessageStore, NO_MESSAGES, SEPARATOR_WIDTH};

/// A single posted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Zero-padded decimal id (`0000`, `0001`, ...)
    pub id: String,

    /// Message body, may span several lines or be empty
    pub content: String,

    /// Local time of insertion, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

impl Message {
    /// Render the four listing lines for this message
    pub fn render(&self) -> String {
        format!(
            "ID: {}\nTime: {}\nMessage:\n{}\n{}",
            self.id,
            self.timestamp,
            self.content,
            "-".repeat(SEPARATOR_WIDTH)
        )
    }
}
