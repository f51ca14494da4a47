//! Command Processor
//!
//! Maps parsed commands onto store operations and responses.
//!
//! ## Responsibilities
//! - POST: insert the content, answer `OK`
//! - GET: answer with the listing verbatim
//! - DELETE: all-or-nothing delete, `OK` or `ERROR - Wrong ID`
//! - QUIT: answer `OK` and ask the session to close
//! - anything else: `ERROR - Command not understood`
//!
//! Holds no state between frames beyond the shared store.

use std::sync::Arc;

use crate::protocol::{Command, Frame, Response};
use crate::store::MessageStore;

/// The answer to one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Response to send back
    pub response: Response,

    /// Close the session once the response is flushed
    pub close: bool,
}

impl Reply {
    fn keep_open(response: Response) -> Self {
        Self { response, close: false }
    }
}

/// Stateless command executor over a shared store
#[derive(Clone)]
pub struct CommandProcessor {
    store: Arc<MessageStore>,
}

impl CommandProcessor {
    /// Create a processor over the given store
    pub fn new(store: Arc<MessageStore>) -> Self {
        Self { store }
    }

    /// Parse and execute a frame
    pub fn process(&self, frame: Frame) -> Reply {
        self.execute(Command::from_frame(frame))
    }

    /// Execute a command
    ///
    /// Routes commands to the store
    pub fn execute(&self, command: Command) -> Reply {
        match command {
            Command::Post { content } => {
                let id = self.store.insert(content);
                tracing::info!("Message {} posted", id);
                Reply::keep_open(Response::Ok)
            }
            Command::Get => {
                tracing::info!("GET request served");
                Reply::keep_open(Response::Listing(self.store.list_all()))
            }
            Command::Delete { ids } => {
                if self.store.delete_many(&ids) {
                    tracing::info!("Deleted messages {:?}", ids);
                    Reply::keep_open(Response::Ok)
                } else {
                    tracing::warn!("Invalid IDs in delete request: {:?}", ids);
                    Reply::keep_open(Response::WrongId)
                }
            }
            Command::Quit => Reply {
                response: Response::Ok,
                close: true,
            },
            Command::Unknown { keyword } => {
                tracing::debug!("Command not understood: {:?}", keyword);
                Reply::keep_open(Response::NotUnderstood)
            }
        }
    }

    /// Get the shared store
    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }
}
