//! Byte-oriented command input.
//!
//! The movement engine polls at most one byte per tick without blocking; the
//! coordinator blocks on the same stream while the menu is shown. Exactly one
//! of them owns the port at a time.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::types::Command;

/// Create an input port and the sender that feeds it.
pub fn channel(buffer: usize) -> (mpsc::Sender<u8>, InputPort) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (tx, InputPort::new(rx))
}

/// What happened to a byte handed to [`offer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offered {
    Queued,
    /// The port was full; the byte is discarded.
    Dropped,
    /// The port is gone.
    Closed,
}

/// Queue `byte` without blocking the caller.
///
/// Key readers use this so a backlog never delays quit handling; like a
/// single-byte serial receiver, keys pressed while the port is full are lost.
pub fn offer(tx: &mpsc::Sender<u8>, byte: u8) -> Offered {
    match tx.try_send(byte) {
        Ok(()) => Offered::Queued,
        Err(TrySendError::Full(_)) => Offered::Dropped,
        Err(TrySendError::Closed(_)) => Offered::Closed,
    }
}

#[derive(Debug)]
pub struct InputPort {
    rx: mpsc::Receiver<u8>,
}

impl InputPort {
    pub fn new(rx: mpsc::Receiver<u8>) -> Self {
        Self { rx }
    }

    /// Consume at most one pending byte and decode it.
    ///
    /// An empty or closed stream is just "no input".
    pub fn try_command(&mut self) -> Option<Command> {
        let byte = self.rx.try_recv().ok()?;
        Command::from_byte(byte)
    }

    /// Block until a start command arrives, discarding everything else.
    ///
    /// Returns `false` if the input stream closed first.
    pub async fn wait_for_start(&mut self) -> bool {
        while let Some(byte) = self.rx.recv().await {
            if Command::from_byte(byte) == Some(Command::Start) {
                return true;
            }
        }
        false
    }
}
