//! Movement engine: the periodic task that moves the snake.
//!
//! Every period, anchored to absolute time so the cadence does not drift, it
//! takes the state lock, applies at most one input byte, advances the snake and
//! emits the resulting render events before releasing the lock.
//!
//! When the snake dies or fills the board the engine tears the session down
//! itself: lock released, workers stopped and joined, one Loss/Win event
//! emitted, then the report is returned to the coordinator.

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::core::AdvanceOutcome;
use crate::error::EngineError;
use crate::input::InputPort;
use crate::session::{SessionContext, SessionReport, Workers};
use crate::types::{Command, Outcome, PowerupKind, RenderEvent};

pub(crate) async fn run_movement(
    ctx: SessionContext,
    mut input: InputPort,
    workers: Workers,
) -> Result<SessionReport, EngineError> {
    let played = play(&ctx, &mut input).await;

    // The state lock is not held here; every worker is parked at a wait point
    // or finishing its own critical section.
    workers.shutdown().await;

    let outcome = played?;
    let score = ctx.state.lock().await.score();
    ctx.mailbox.send(RenderEvent::from(outcome)).await?;
    info!(?outcome, score, "session ended");

    Ok(SessionReport {
        outcome,
        score,
        input,
        rng: ctx.rng.snapshot(),
    })
}

async fn play(ctx: &SessionContext, input: &mut InputPort) -> Result<Outcome, EngineError> {
    // First move one full period after the session starts.
    let mut ticker = interval_at(Instant::now() + ctx.tick_period, ctx.tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        ticker.tick().await;
        if let Some(outcome) = step(ctx, input).await? {
            return Ok(outcome);
        }
    }
}

/// Run one movement tick. Returns the outcome if the session ended.
pub(crate) async fn step(
    ctx: &SessionContext,
    input: &mut InputPort,
) -> Result<Option<Outcome>, EngineError> {
    let mut state = ctx.state.lock().await;

    if let Some(Command::Turn(direction)) = input.try_command() {
        let before = state.direction();
        state.turn(direction);
        if state.direction() != before {
            debug!(direction = state.direction().as_str(), "turned");
        }
    }

    let advance = state.advance();

    if let Some(pickup) = advance.pickup {
        debug!(kind = pickup.kind.as_str(), score = pickup.score, "powerup eaten");
        if pickup.kind == PowerupKind::Normal {
            ctx.need_normal.notify_one();
        }
        ctx.mailbox
            .send(RenderEvent::PowerupCleared {
                kind: pickup.kind,
                pos: pickup.pos,
            })
            .await?;
        ctx.mailbox
            .send(RenderEvent::ScoreChanged(pickup.score))
            .await?;
    }

    match advance.outcome {
        AdvanceOutcome::Moved {
            head,
            tail_removed,
            tail,
        } => {
            ctx.mailbox
                .send(RenderEvent::SnakeAdvance {
                    head,
                    tail_removed,
                    tail,
                })
                .await?;
            Ok(None)
        }
        AdvanceOutcome::Lost(cause) => Ok(Some(Outcome::Lost(cause))),
        AdvanceOutcome::Won => Ok(Some(Outcome::Won)),
    }
}
