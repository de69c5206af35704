//! Item spawners: normal powerup, special powerup and enemy.
//!
//! All three place entities with the same rule (off the snake, off the other
//! two entities). Each worker exits when the session's stop signal fires
//! while it waits for its trigger, for the state lock, or for its next period.
//! A worker that already holds the lock finishes its update and render sends
//! first.

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::core::{find_free_cell, EntitySlot, GameState};
use crate::error::EngineError;
use crate::session::SessionContext;
use crate::stop::StopListener;
use crate::types::{Position, PowerupKind, RenderEvent};

const NORMAL: EntitySlot = EntitySlot::Powerup(PowerupKind::Normal);
const SPECIAL: EntitySlot = EntitySlot::Powerup(PowerupKind::Special);

/// Place `slot` on a free cell. Caller holds the state lock.
fn place(ctx: &SessionContext, state: &mut GameState, slot: EntitySlot) -> Option<Position> {
    let mut source = &*ctx.rng;
    let pos = find_free_cell(state, slot, &mut source, ctx.config.placement_attempts);
    match pos {
        Some(pos) => {
            state.set_entity(slot, pos);
            debug!(entity = slot.as_str(), x = pos.x, y = pos.y, "placed");
        }
        None => warn!(entity = slot.as_str(), "no free cell to place on"),
    }
    pos
}

/// Places a normal powerup each time one is requested.
pub(crate) async fn run_normal_spawner(
    ctx: SessionContext,
    mut stop: StopListener,
) -> Result<(), EngineError> {
    loop {
        tokio::select! {
            biased;
            _ = stop.stopped() => return Ok(()),
            _ = ctx.need_normal.notified() => {}
        }

        let Some(mut state) = ctx.lock_or_stop(&mut stop).await else {
            return Ok(());
        };
        if let Some(pos) = place(&ctx, &mut state, NORMAL) {
            ctx.mailbox
                .send(RenderEvent::PowerupPlaced {
                    kind: PowerupKind::Normal,
                    pos,
                })
                .await?;
        }
    }
}

/// Expires the special powerup every period and rolls for a new one.
pub(crate) async fn run_special_spawner(
    ctx: SessionContext,
    mut stop: StopListener,
) -> Result<(), EngineError> {
    let frequency = ctx.config.special_frequency.max(1) as i32;

    loop {
        {
            let Some(mut state) = ctx.lock_or_stop(&mut stop).await else {
                return Ok(());
            };

            if let Some(pos) = state.take_entity(SPECIAL) {
                ctx.mailbox
                    .send(RenderEvent::PowerupCleared {
                        kind: PowerupKind::Special,
                        pos,
                    })
                    .await?;
            }

            if ctx.rng.next_i32() % frequency == 0 {
                if let Some(pos) = place(&ctx, &mut state, SPECIAL) {
                    ctx.mailbox
                        .send(RenderEvent::PowerupPlaced {
                            kind: PowerupKind::Special,
                            pos,
                        })
                        .await?;
                }
            }
        }

        tokio::select! {
            biased;
            _ = stop.stopped() => return Ok(()),
            _ = sleep(ctx.config.special_period) => {}
        }
    }
}

/// Relocates the enemy every period.
pub(crate) async fn run_enemy_spawner(
    ctx: SessionContext,
    mut stop: StopListener,
) -> Result<(), EngineError> {
    loop {
        {
            let Some(mut state) = ctx.lock_or_stop(&mut stop).await else {
                return Ok(());
            };

            if let Some(pos) = state.take_entity(EntitySlot::Enemy) {
                ctx.mailbox.send(RenderEvent::EnemyCleared(pos)).await?;
            }
            if let Some(pos) = place(&ctx, &mut state, EntitySlot::Enemy) {
                ctx.mailbox.send(RenderEvent::EnemyPlaced(pos)).await?;
            }
        }

        tokio::select! {
            biased;
            _ = stop.stopped() => return Ok(()),
            _ = sleep(ctx.config.enemy_period) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::config::EngineConfig;
    use crate::core::XorShift32;
    use crate::mailbox::{self, RenderReceiver};
    use crate::stop::StopSignal;

    fn context(state: GameState, config: EngineConfig) -> (SessionContext, RenderReceiver) {
        let (tx, rx) = mailbox::channel();
        let ctx = SessionContext::new(
            state,
            XorShift32::new(12345),
            Instant::now(),
            60,
            tx,
            Arc::new(config),
        );
        (ctx, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_normal_spawner_places_on_start_and_on_request() {
        let (ctx, mut rx) = context(GameState::new(), EngineConfig::default());
        let signal = StopSignal::new();
        let worker = tokio::spawn(run_normal_spawner(ctx.clone(), signal.subscribe()));

        // Pre-signalled at session start; first sample of seed 12345 is free.
        assert_eq!(
            rx.recv().await,
            Some(RenderEvent::PowerupPlaced {
                kind: PowerupKind::Normal,
                pos: Position::new(10, 3),
            })
        );
        assert_eq!(ctx.snapshot().await.entity(NORMAL), Some(Position::new(10, 3)));

        ctx.state.lock().await.take_entity(NORMAL);
        ctx.need_normal.notify_one();
        assert_eq!(
            rx.recv().await,
            Some(RenderEvent::PowerupPlaced {
                kind: PowerupKind::Normal,
                pos: Position::new(0, 6),
            })
        );

        signal.trigger();
        worker.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_enemy_spawner_relocates_every_period() {
        let config = EngineConfig {
            enemy_period: Duration::from_millis(100),
            ..EngineConfig::default()
        };
        let (ctx, mut rx) = context(GameState::new(), config);
        let signal = StopSignal::new();
        let worker = tokio::spawn(run_enemy_spawner(ctx.clone(), signal.subscribe()));

        let first = match rx.recv().await {
            Some(RenderEvent::EnemyPlaced(pos)) => pos,
            other => panic!("expected EnemyPlaced, got {:?}", other),
        };
        assert_eq!(rx.recv().await, Some(RenderEvent::EnemyCleared(first)));
        match rx.recv().await {
            Some(RenderEvent::EnemyPlaced(pos)) => {
                assert!(!ctx.snapshot().await.occupies_body(pos));
            }
            other => panic!("expected EnemyPlaced, got {:?}", other),
        }

        signal.trigger();
        worker.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_special_spawner_always_places_with_frequency_one() {
        let config = EngineConfig {
            special_frequency: 1,
            special_period: Duration::from_millis(100),
            ..EngineConfig::default()
        };
        let (ctx, mut rx) = context(GameState::new(), config);
        let signal = StopSignal::new();
        let worker = tokio::spawn(run_special_spawner(ctx.clone(), signal.subscribe()));

        let placed = match rx.recv().await {
            Some(RenderEvent::PowerupPlaced {
                kind: PowerupKind::Special,
                pos,
            }) => pos,
            other => panic!("expected special placement, got {:?}", other),
        };
        // Next period: the old one expires before a new roll.
        assert_eq!(
            rx.recv().await,
            Some(RenderEvent::PowerupCleared {
                kind: PowerupKind::Special,
                pos: placed,
            })
        );

        signal.trigger();
        // Drain whatever the worker was sending when the stop arrived.
        let drain = tokio::spawn(async move { while rx.recv().await.is_some() {} });
        worker.await.unwrap().unwrap();
        drop(ctx);
        drain.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_waiting_for_lock() {
        let (ctx, _rx) = context(GameState::new(), EngineConfig::default());
        let signal = StopSignal::new();

        let guard = ctx.state.lock().await;
        let worker = tokio::spawn(run_enemy_spawner(ctx.clone(), signal.subscribe()));
        tokio::task::yield_now().await;

        signal.trigger();
        worker.await.unwrap().unwrap();
        drop(guard);

        assert_eq!(ctx.snapshot().await.entity(EntitySlot::Enemy), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_placement_avoids_other_entities() {
        let mut state = GameState::new();
        // Seed 12345 proposes (10,3) first; block it with the enemy.
        state.set_entity(EntitySlot::Enemy, Position::new(10, 3));
        let (ctx, mut rx) = context(state, EngineConfig::default());
        let signal = StopSignal::new();
        let worker = tokio::spawn(run_normal_spawner(ctx.clone(), signal.subscribe()));

        assert_eq!(
            rx.recv().await,
            Some(RenderEvent::PowerupPlaced {
                kind: PowerupKind::Normal,
                pos: Position::new(0, 6),
            })
        );

        signal.trigger();
        worker.await.unwrap().unwrap();
    }
}
