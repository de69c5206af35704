//! Render loop: drains the mailbox into a sink.

use std::io;
use std::time::Duration;

use tracing::debug;

use crate::error::EngineError;
use crate::mailbox::RenderReceiver;
use crate::types::RenderEvent;

/// Presentation side of the mailbox. Owns all formatting.
pub trait RenderSink {
    fn render(&mut self, event: &RenderEvent) -> io::Result<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn render(&mut self, event: &RenderEvent) -> io::Result<()> {
        (**self).render(event)
    }
}

/// Sink that keeps every event, for tests and replays.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<RenderEvent>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, event: &RenderEvent) -> io::Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Draw events in mailbox order until every sender is gone.
///
/// After a Loss or Win the loop holds for `end_delay` before taking the next
/// event, which keeps the end message on screen and stalls producers.
pub async fn run_render_loop<S: RenderSink>(
    mut mailbox: RenderReceiver,
    mut sink: S,
    end_delay: Duration,
) -> Result<S, EngineError> {
    while let Some(event) = mailbox.recv().await {
        sink.render(&event)?;
        if event.is_terminal() {
            debug!(?event, "holding end message");
            tokio::time::sleep(end_delay).await;
        }
    }
    Ok(sink)
}
