//! Engine errors.
//!
//! Losing or winning a session is never an error; these cover the plumbing
//! around it.

use std::io;

/// Failures of the session engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The render loop is gone; nothing can be drawn any more.
    #[error("render mailbox closed")]
    MailboxClosed,

    /// A session was started while another one still owned the input port.
    #[error("a session is already active")]
    SessionAlreadyActive,

    /// The render sink failed to draw an event.
    #[error("render sink failed: {0}")]
    Sink(#[from] io::Error),

    /// A session task panicked or was aborted.
    #[error("session task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
