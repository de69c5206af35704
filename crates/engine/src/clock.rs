//! Elapsed-time clock: counts whole seconds since the session started.

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::EngineError;
use crate::session::SessionContext;
use crate::stop::StopListener;
use crate::types::{RenderEvent, CLOCK_PERIOD_MS};

pub(crate) async fn run_clock(
    ctx: SessionContext,
    mut stop: StopListener,
) -> Result<(), EngineError> {
    let period = Duration::from_millis(CLOCK_PERIOD_MS);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    let mut elapsed: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = stop.stopped() => return Ok(()),
            _ = ticker.tick() => {}
        }

        elapsed = elapsed.saturating_add(1);

        // Holds no lock, so the send itself may be abandoned on stop.
        tokio::select! {
            biased;
            _ = stop.stopped() => return Ok(()),
            sent = ctx.mailbox.send(RenderEvent::TimeChanged(elapsed)) => sent?,
        }
    }
}
