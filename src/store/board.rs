//! MessageStore implementation
//!
//! BTreeMap-based board with a single Mutex for atomic operations.

use std::collections::BTreeMap;

use chrono::Local;
use parking_lot::Mutex;

use super::Message;

/// Listing returned when the board is empty
pub const NO_MESSAGES: &str = "No messages available.";

/// Width of the dash line closing each listing entry
pub const SEPARATOR_WIDTH: usize = 40;

/// Timestamp format used for every message
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a counter value as a message id
fn format_id(n: u64) -> String {
    format!("{:04}", n)
}

/// Map a textual id back to its counter value
///
/// Only canonical ids map: `"0001"` does, `"1"` and `" 0001"` do not.
fn id_order(id: &str) -> Option<u64> {
    let n: u64 = id.parse().ok()?;
    (format_id(n) == id).then_some(n)
}

/// Board state guarded by the store's mutex
struct Board {
    /// Messages keyed by counter value, so iteration stays numeric
    /// once ids grow past four digits
    messages: BTreeMap<u64, Message>,

    /// Next id to hand out; never decreases
    next_id: u64,
}

/// Thread-safe message store shared by all sessions
pub struct MessageStore {
    inner: Mutex<Board>,
}

impl MessageStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Board {
                messages: BTreeMap::new(),
                next_id: 0,
            }),
        }
    }

    /// Store a message and return its newly assigned id
    ///
    /// The counter advances on every call, empty content included.
    pub fn insert(&self, content: impl Into<String>) -> String {
        let mut board = self.inner.lock();

        let n = board.next_id;
        let id = format_id(n);
        let message = Message {
            id: id.clone(),
            content: content.into(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };

        board.messages.insert(n, message);
        board.next_id += 1;

        id
    }

    /// Render every message in ascending id order
    ///
    /// Returns [`NO_MESSAGES`] when the board is empty.
    pub fn list_all(&self) -> String {
        let board = self.inner.lock();

        if board.messages.is_empty() {
            return NO_MESSAGES.to_string();
        }

        board
            .messages
            .values()
            .map(Message::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Delete every id in `ids`, or none of them
    ///
    /// All ids are validated before anything is removed. A single
    /// unknown id leaves the board untouched and returns `false`.
    /// Repeated ids are removed once; an empty list succeeds.
    pub fn delete_many<S: AsRef<str>>(&self, ids: &[S]) -> bool {
        let mut board = self.inner.lock();

        let mut keys = Vec::with_capacity(ids.len());
        for id in ids {
            match id_order(id.as_ref()) {
                Some(n) if board.messages.contains_key(&n) => keys.push(n),
                _ => return false,
            }
        }

        for n in keys {
            board.messages.remove(&n);
        }
        true
    }

    /// Snapshot of the stored messages in ascending id order
    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().messages.values().cloned().collect()
    }

    /// Get a single message by id
    pub fn get(&self, id: &str) -> Option<Message> {
        let n = id_order(id)?;
        self.inner.lock().messages.get(&n).cloned()
    }

    /// Number of stored messages
    pub fn len(&self) -> usize {
        self.inner.lock().messages.len()
    }

    /// Check if the board holds no messages
    pub fn is_empty(&self) -> bool {
        self.inner.lock().messages.is_empty()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
