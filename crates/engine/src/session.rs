//! Session context and worker lifecycle.
//!
//! Everything a session shares lives in one [`SessionContext`] built at session
//! start and dropped when the session ends: the state lock, the generator
//! lock, the "normal powerup needed" signal and the mailbox handle. Nothing is
//! reused across sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::clock::run_clock;
use crate::config::{tick_period, EngineConfig};
use crate::core::{GameState, XorShift32};
use crate::error::EngineError;
use crate::input::InputPort;
use crate::mailbox::RenderSender;
use crate::movement::run_movement;
use crate::rng::SharedRng;
use crate::spawners::{run_enemy_spawner, run_normal_spawner, run_special_spawner};
use crate::stop::{StopListener, StopSignal};
use crate::types::Outcome;

/// Handles shared by every task of one session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub(crate) state: Arc<Mutex<GameState>>,
    pub(crate) rng: Arc<SharedRng>,
    pub(crate) need_normal: Arc<Notify>,
    pub(crate) mailbox: RenderSender,
    pub(crate) config: Arc<EngineConfig>,
    pub(crate) tick_period: Duration,
}

impl SessionContext {
    /// Build a fresh context around `state`.
    ///
    /// The normal-powerup signal starts raised when the state has no normal
    /// powerup, so one is placed straight away.
    pub fn new(
        state: GameState,
        rng: XorShift32,
        epoch: Instant,
        speed: u32,
        mailbox: RenderSender,
        config: Arc<EngineConfig>,
    ) -> Self {
        let needs_normal = state
            .entity(crate::core::EntitySlot::Powerup(crate::types::PowerupKind::Normal))
            .is_none();
        let need_normal = Arc::new(Notify::new());
        if needs_normal {
            need_normal.notify_one();
        }

        Self {
            state: Arc::new(Mutex::new(state)),
            rng: Arc::new(SharedRng::new(rng, epoch)),
            need_normal,
            mailbox,
            config,
            tick_period: tick_period(speed),
        }
    }

    /// Take the state lock, giving up if `stop` fires first.
    pub(crate) async fn lock_or_stop(
        &self,
        stop: &mut StopListener,
    ) -> Option<MutexGuard<'_, GameState>> {
        tokio::select! {
            biased;
            _ = stop.stopped() => None,
            guard = self.state.lock() => Some(guard),
        }
    }

    /// Copy of the current state, taken under the lock.
    pub async fn snapshot(&self) -> GameState {
        self.state.lock().await.clone()
    }
}

/// What the coordinator gets back when a session ends.
#[derive(Debug)]
pub struct SessionReport {
    pub outcome: Outcome,
    pub score: u32,
    /// Input port handed back for the menu.
    pub input: InputPort,
    /// Generator state, so the random stream continues across sessions.
    pub rng: XorShift32,
}

/// The spawners and the clock of one session.
pub(crate) struct Workers {
    stop: StopSignal,
    handles: Vec<(&'static str, JoinHandle<Result<(), EngineError>>)>,
}

impl Workers {
    fn spawn(ctx: &SessionContext) -> Self {
        let stop = StopSignal::new();
        let handles = vec![
            (
                "normal-powerup",
                tokio::spawn(run_normal_spawner(ctx.clone(), stop.subscribe())),
            ),
            (
                "special-powerup",
                tokio::spawn(run_special_spawner(ctx.clone(), stop.subscribe())),
            ),
            (
                "enemy",
                tokio::spawn(run_enemy_spawner(ctx.clone(), stop.subscribe())),
            ),
            ("clock", tokio::spawn(run_clock(ctx.clone(), stop.subscribe()))),
        ];
        Self { stop, handles }
    }

    /// Stop every worker and wait until all of them have exited.
    ///
    /// Must be called without holding the state lock.
    pub(crate) async fn shutdown(self) {
        self.stop.trigger();
        for (name, handle) in self.handles {
            match handle.await {
                Ok(Ok(())) => debug!("{} worker stopped", name),
                Ok(Err(e)) => warn!("{} worker failed: {}", name, e),
                Err(e) => error!("{} worker panicked: {}", name, e),
            }
        }
    }
}

/// A running session.
pub struct ActiveSession {
    ctx: SessionContext,
    engine: JoinHandle<Result<SessionReport, EngineError>>,
}

impl ActiveSession {
    /// Spawn the movement engine and its workers for `ctx`.
    ///
    /// The input port belongs to the engine until the session ends.
    pub fn start(ctx: SessionContext, input: InputPort) -> Self {
        info!(period_ms = ctx.tick_period.as_millis() as u64, "session starting");
        let workers = Workers::spawn(&ctx);
        let engine = tokio::spawn(run_movement(ctx.clone(), input, workers));
        Self { ctx, engine }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Wait for the engine to report the end of the session.
    pub async fn finished(self) -> Result<SessionReport, EngineError> {
        self.engine.await?
    }
}
