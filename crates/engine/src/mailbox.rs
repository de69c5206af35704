//! Render mailbox: a single-slot, blocking, FIFO channel.
//!
//! `send` waits until the slot is free, i.e. until the previous event has been
//! taken by the render loop, so a slow sink stalls only the producer that is
//! currently sending. Events are never dropped, merged or reordered.

use tokio::sync::mpsc;

use crate::error::EngineError;
use crate::types::RenderEvent;

/// Number of events the mailbox holds.
pub const MAILBOX_CAPACITY: usize = 1;

/// Create a connected mailbox pair.
pub fn channel() -> (RenderSender, RenderReceiver) {
    let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
    (RenderSender { tx }, RenderReceiver { rx })
}

/// Producer side; cheap to clone, one per task.
#[derive(Debug, Clone)]
pub struct RenderSender {
    tx: mpsc::Sender<RenderEvent>,
}

impl RenderSender {
    /// Block until the slot is free, then deposit `event`.
    pub async fn send(&self, event: RenderEvent) -> Result<(), EngineError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| EngineError::MailboxClosed)
    }
}

/// Consumer side, owned by the render loop.
#[derive(Debug)]
pub struct RenderReceiver {
    rx: mpsc::Receiver<RenderEvent>,
}

impl RenderReceiver {
    /// Block until an event is available. `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<RenderEvent> {
        self.rx.recv().await
    }

    /// Take an event if one is waiting.
    pub fn try_recv(&mut self) -> Option<RenderEvent> {
        self.rx.try_recv().ok()
    }
}
