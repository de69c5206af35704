//! Cooperative stop signal for session workers.
//!
//! Workers subscribe before they are spawned and check the signal only at
//! their blocking points, so a worker never exits in the middle of a state
//! update.

use tokio::sync::broadcast;

#[derive(Debug)]
pub struct StopSignal {
    tx: broadcast::Sender<()>,
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> StopListener {
        StopListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every listener to stop.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

#[derive(Debug)]
pub struct StopListener {
    rx: broadcast::Receiver<()>,
}

impl StopListener {
    /// Resolves once a stop was requested or the signal was dropped.
    ///
    /// Cancel safe; use inside `tokio::select!`.
    pub async fn stopped(&mut self) {
        let _ = self.rx.recv().await;
    }
}
