use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use tui_snake::core::{EntitySlot, GameState, XorShift32};
use tui_snake::engine::{
    input, mailbox, next_speed, ActiveSession, Coordinator, EngineConfig, Phase,
    RenderReceiver, SessionContext,
};
use tui_snake::types::{Direction, LossCause, Outcome, Position, PowerupKind, RenderEvent};

// Seed 12345 with a fresh board: the normal powerup lands on (10,3), the
// special roll fails and the enemy lands on (6,4).
const SEED: u32 = 12345;

fn seeded_config() -> EngineConfig {
    EngineConfig {
        seed: Some(SEED),
        ..EngineConfig::default()
    }
}

fn start(state: GameState) -> (ActiveSession, RenderReceiver, tokio::sync::mpsc::Sender<u8>) {
    let (tx, rx) = mailbox::channel();
    let (input_tx, port) = input::channel(8);
    let ctx = SessionContext::new(
        state,
        XorShift32::new(SEED),
        Instant::now(),
        60,
        tx,
        Arc::new(seeded_config()),
    );
    (ActiveSession::start(ctx, port), rx, input_tx)
}

fn without_clock(events: &[RenderEvent]) -> Vec<RenderEvent> {
    events
        .iter()
        .filter(|e| !matches!(e, RenderEvent::TimeChanged(_)))
        .cloned()
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_three_ticks_only_advance() {
    let (_session, mut rx, _input) = start(GameState::new());
    let started = Instant::now();

    let mut placements = Vec::new();
    let mut moves = Vec::new();
    while moves.len() < 3 {
        match rx.recv().await {
            Some(RenderEvent::SnakeAdvance {
                head,
                tail_removed,
                tail,
            }) => moves.push((head, tail_removed, tail, started.elapsed())),
            Some(RenderEvent::TimeChanged(_)) => {}
            Some(other) => placements.push(other),
            None => panic!("mailbox closed mid-session"),
        }
    }

    assert_eq!(
        placements,
        vec![
            RenderEvent::PowerupPlaced {
                kind: PowerupKind::Normal,
                pos: Position::new(10, 3),
            },
            RenderEvent::EnemyPlaced(Position::new(6, 4)),
        ]
    );
    for (n, (head, tail_removed, tail, at)) in moves.into_iter().enumerate() {
        let n = n as i32 + 1;
        assert_eq!(head, Position::new(6 + n, 6));
        assert!(tail_removed);
        assert_eq!(tail, Position::new(2 + n, 6));
        assert_eq!(at, Duration::from_millis(1000 * n as u64));
    }
}

#[tokio::test(start_paused = true)]
async fn test_normal_pickup_grows_scores_and_respawns() {
    let mut state = GameState::new();
    state.set_entity(EntitySlot::Powerup(PowerupKind::Normal), Position::new(7, 6));
    let (session, mut rx, _input) = start(state);

    let mut events = Vec::new();
    while events.len() < 5 {
        match rx.recv().await {
            Some(RenderEvent::TimeChanged(_)) => {}
            Some(event) => events.push(event),
            None => panic!("mailbox closed mid-session"),
        }
    }

    assert_eq!(
        events,
        vec![
            // Pre-placed powerup: no spawn at start, enemy draws (3,0).
            RenderEvent::EnemyPlaced(Position::new(3, 0)),
            RenderEvent::PowerupCleared {
                kind: PowerupKind::Normal,
                pos: Position::new(7, 6),
            },
            RenderEvent::ScoreChanged(1),
            RenderEvent::SnakeAdvance {
                head: Position::new(7, 6),
                tail_removed: false,
                tail: Position::new(3, 6),
            },
            RenderEvent::PowerupPlaced {
                kind: PowerupKind::Normal,
                pos: Position::new(6, 4),
            },
        ]
    );

    let state = session.context().snapshot().await;
    assert_eq!(state.len(), 5);
    assert_eq!(state.score(), 1);
    assert_eq!(
        state.entity(EntitySlot::Powerup(PowerupKind::Normal)),
        Some(Position::new(6, 4))
    );
}

/// 49 cells: rows 0..=3 right to left, then the head at (0,4).
fn one_short_of_full() -> GameState {
    let mut body = vec![Position::new(0, 4)];
    for y in (0..4).rev() {
        for x in (0..12).rev() {
            body.push(Position::new(x, y));
        }
    }
    let mut state = GameState::from_body(&body, Direction::Right).unwrap();
    state.set_entity(EntitySlot::Powerup(PowerupKind::Normal), Position::new(1, 4));
    state
}

#[tokio::test(start_paused = true)]
async fn test_reaching_capacity_wins() {
    let (session, mut rx, _input) = start(one_short_of_full());
    let collector = tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    });

    let report = session.finished().await.unwrap();
    assert_eq!(report.outcome, Outcome::Won);
    assert_eq!(report.score, 1);
    assert_eq!(next_speed(60, Some(report.outcome), 60), 90);

    let events = without_clock(&collector.await.unwrap());
    assert_eq!(
        events,
        vec![
            // (3,0) is on the snake, so the enemy takes the next sample.
            RenderEvent::EnemyPlaced(Position::new(6, 4)),
            RenderEvent::PowerupCleared {
                kind: PowerupKind::Normal,
                pos: Position::new(1, 4),
            },
            RenderEvent::ScoreChanged(1),
            RenderEvent::Win,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_enemy_collision_is_last_event() {
    let (session, mut rx, input_tx) = start(GameState::new());
    // Up, then straight into the enemy placed at (6,4).
    input_tx.send(b'w').await.unwrap();

    let collector = tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    });

    let report = session.finished().await.unwrap();
    assert_eq!(report.outcome, Outcome::Lost(LossCause::EnemyCollision));

    let events = collector.await.unwrap();
    assert_eq!(events.last(), Some(&RenderEvent::Loss));
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_self_collision_returns_to_menu() {
    let (tx, mut rx) = mailbox::channel();
    let (input_tx, port) = input::channel(8);
    let mut coordinator = Coordinator::new(seeded_config(), tx, port);

    // Start, then up, left, down: the head runs into the tail on tick three.
    for byte in *b"ewas" {
        input_tx.send(byte).await.unwrap();
    }

    let runner = tokio::spawn(async move {
        let result = coordinator.run().await;
        (coordinator, result)
    });

    let mut events = Vec::new();
    let mut menus = 0;
    while menus < 2 {
        let event = rx.recv().await.expect("coordinator stopped early");
        if event == RenderEvent::Menu {
            menus += 1;
        }
        events.push(event);
    }
    drop(input_tx);

    let (coordinator, result) = runner.await.unwrap();
    result.unwrap();
    assert_eq!(coordinator.phase(), Phase::Menu);
    assert_eq!(
        coordinator.last_outcome(),
        Some(Outcome::Lost(LossCause::SelfCollision))
    );
    assert_eq!(coordinator.speed(), 60);

    assert_eq!(events.first(), Some(&RenderEvent::Menu));
    assert!(matches!(events[1], RenderEvent::SessionStart { ref snake } if snake.len() == 4));
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert_eq!(&events[events.len() - 2..], &[RenderEvent::Loss, RenderEvent::Menu]);

    let moves = events
        .iter()
        .filter(|e| matches!(e, RenderEvent::SnakeAdvance { .. }))
        .count();
    assert_eq!(moves, 2);
}
