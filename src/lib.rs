//! # msgboard
//!
//! A minimal message board served over persistent TCP connections:
//! - Line-delimited text protocol (POST, GET, DELETE, QUIT)
//! - Shared in-memory store with monotonically assigned ids
//! - All-or-nothing multi-id deletes
//! - One thread per connected client
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Connection Acceptor                        │
//! │                (one thread per client)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Session Handler                            │
//! │        AwaitingFrame → Processing → ... → Closed             │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │  Frame Reader   │                │ CommandProcessor│
//!   │ (lines, '#' end)│                │   (stateless)   │
//!   └─────────────────┘                └────────┬────────┘
//!                                               │
//!                                               ▼
//!                                      ┌─────────────────┐
//!                                      │  MessageStore   │
//!                                      │    (Mutex)      │
//!                                      └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod protocol;
pub mod processor;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BoardError, Result};
pub use config::Config;
pub use store::{Message, MessageStore};
pub use processor::CommandProcessor;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of msgboard
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
