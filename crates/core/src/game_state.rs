//! Game state module - the single mutable model of a session
//!
//! Holds the snake body, heading, score and the three optional entities, and
//! implements the one-cell advance that the movement engine runs every tick:
//! turn, wraparound, collision, pickup, win detection and the body shift.

use arrayvec::ArrayVec;

use crate::types::*;

/// Snake body, head first.
pub type SnakeBody = ArrayVec<Position, MAX_SNAKE_LENGTH>;

/// Identifies one of the three entity slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntitySlot {
    Powerup(PowerupKind),
    Enemy,
}

impl EntitySlot {
    pub const ALL: [EntitySlot; 3] = [
        EntitySlot::Powerup(PowerupKind::Normal),
        EntitySlot::Powerup(PowerupKind::Special),
        EntitySlot::Enemy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntitySlot::Powerup(kind) => kind.as_str(),
            EntitySlot::Enemy => "enemy",
        }
    }
}

/// A powerup eaten during an advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pickup {
    pub kind: PowerupKind,
    pub pos: Position,
    /// Score after the pickup was applied.
    pub score: u32,
}

/// What a single advance did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The body shifted; `tail` is the pre-shift tail cell.
    Moved {
        head: Position,
        tail_removed: bool,
        tail: Position,
    },
    /// Nothing moved; the session is over.
    Lost(LossCause),
    /// Capacity reached; the body is left unshifted.
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    pub pickup: Option<Pickup>,
    pub outcome: AdvanceOutcome,
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    body: SnakeBody,
    direction: Direction,
    normal_powerup: Option<Position>,
    special_powerup: Option<Position>,
    enemy: Option<Position>,
    score: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial snake: length 4, head at the grid centre, facing right.
    pub fn new() -> Self {
        let body = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|i| Position::new(GRID_WIDTH / 2 - i, GRID_HEIGHT / 2))
            .collect();

        Self {
            body,
            direction: Direction::Right,
            normal_powerup: None,
            special_powerup: None,
            enemy: None,
            score: 0,
        }
    }

    /// Build a state from an explicit body (head first) and heading.
    ///
    /// Returns `None` if the body is empty, already at capacity, has a cell
    /// off the grid, or repeats a cell.
    pub fn from_body(body: &[Position], direction: Direction) -> Option<Self> {
        if body.is_empty()
            || body.len() >= MAX_SNAKE_LENGTH
            || body.iter().any(|p| !p.in_bounds())
        {
            return None;
        }
        let mut out = SnakeBody::new();
        for &p in body {
            if out.contains(&p) {
                return None;
            }
            out.try_push(p).ok()?;
        }

        Some(Self {
            body: out,
            direction,
            ..Self::new()
        })
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn entity(&self, slot: EntitySlot) -> Option<Position> {
        match slot {
            EntitySlot::Powerup(PowerupKind::Normal) => self.normal_powerup,
            EntitySlot::Powerup(PowerupKind::Special) => self.special_powerup,
            EntitySlot::Enemy => self.enemy,
        }
    }

    fn entity_mut(&mut self, slot: EntitySlot) -> &mut Option<Position> {
        match slot {
            EntitySlot::Powerup(PowerupKind::Normal) => &mut self.normal_powerup,
            EntitySlot::Powerup(PowerupKind::Special) => &mut self.special_powerup,
            EntitySlot::Enemy => &mut self.enemy,
        }
    }

    /// Put an entity on the grid, replacing whatever occupied the slot.
    pub fn set_entity(&mut self, slot: EntitySlot, pos: Position) {
        *self.entity_mut(slot) = Some(pos);
    }

    /// Remove an entity, returning where it was.
    pub fn take_entity(&mut self, slot: EntitySlot) -> Option<Position> {
        self.entity_mut(slot).take()
    }

    pub fn occupies_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Whether `slot` may be placed at `pos`: not on the snake and not on
    /// either of the other two entities.
    pub fn is_free_for(&self, slot: EntitySlot, pos: Position) -> bool {
        if self.occupies_body(pos) {
            return false;
        }
        EntitySlot::ALL
            .iter()
            .filter(|&&other| other != slot)
            .all(|&other| self.entity(other) != Some(pos))
    }

    /// Apply a requested heading (perpendicular turns only).
    pub fn turn(&mut self, requested: Direction) {
        self.direction = self.direction.turn(requested);
    }

    /// The cell the head would move into this tick.
    pub fn next_head(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Advance the snake by one cell.
    pub fn advance(&mut self) -> Advance {
        let head = self.next_head();
        let tail = self.tail();

        // Index 1..len, the current tail included.
        if self.body[1..].contains(&head) {
            return Advance {
                pickup: None,
                outcome: AdvanceOutcome::Lost(LossCause::SelfCollision),
            };
        }
        if self.enemy == Some(head) {
            return Advance {
                pickup: None,
                outcome: AdvanceOutcome::Lost(LossCause::EnemyCollision),
            };
        }

        let mut pickup = None;
        let mut full = false;
        for kind in [PowerupKind::Normal, PowerupKind::Special] {
            let slot = EntitySlot::Powerup(kind);
            if self.entity(slot) == Some(head) {
                self.take_entity(slot);
                self.score += kind.score();
                // Duplicate the old tail into the new slot; the shift below
                // overwrites everything but this last cell.
                full |= self.body.try_push(tail).is_err();
                pickup = Some(Pickup {
                    kind,
                    pos: head,
                    score: self.score,
                });
            }
        }

        // A body at capacity cannot grow further and counts as a win.
        if full || self.body.len() == MAX_SNAKE_LENGTH {
            return Advance {
                pickup,
                outcome: AdvanceOutcome::Won,
            };
        }

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = head;

        Advance {
            pickup,
            outcome: AdvanceOutcome::Moved {
                head,
                tail_removed: pickup.is_none(),
                tail,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(adv: Advance) -> (Position, bool, Position) {
        match adv.outcome {
            AdvanceOutcome::Moved {
                head,
                tail_removed,
                tail,
            } => (head, tail_removed, tail),
            other => panic!("expected a move, got {:?}", other),
        }
    }

    fn body_distinct(state: &GameState) -> bool {
        let body = state.body();
        body.iter()
            .enumerate()
            .all(|(i, p)| !body[i + 1..].contains(p))
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();

        assert_eq!(state.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(state.head(), Position::new(6, 6));
        assert_eq!(state.tail(), Position::new(3, 6));
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        for slot in EntitySlot::ALL {
            assert!(state.entity(slot).is_none());
        }
    }

    #[test]
    fn test_three_plain_ticks() {
        let mut state = GameState::new();

        for step in 1..=3 {
            let before_tail = state.tail();
            let (head, tail_removed, tail) = moved(state.advance());
            assert_eq!(head, Position::new(6 + step, 6));
            assert!(tail_removed);
            assert_eq!(tail, before_tail);
            assert_eq!(state.len(), INITIAL_SNAKE_LENGTH);
            assert!(body_distinct(&state));
        }
        assert_eq!(state.head(), Position::new(9, 6));
        assert_eq!(state.tail(), Position::new(6, 6));
    }

    #[test]
    fn test_wraparound_right_edge() {
        let mut state = GameState::from_body(
            &[Position::new(11, 2), Position::new(10, 2)],
            Direction::Right,
        )
        .unwrap();
        let (head, _, _) = moved(state.advance());
        assert_eq!(head, Position::new(0, 2));
    }

    #[test]
    fn test_wraparound_top_edge() {
        let mut state = GameState::from_body(
            &[Position::new(4, 0), Position::new(4, 1)],
            Direction::Up,
        )
        .unwrap();
        let (head, _, _) = moved(state.advance());
        assert_eq!(head, Position::new(4, GRID_HEIGHT - 1));
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut state = GameState::new();
        state.turn(Direction::Left);
        assert_eq!(state.direction(), Direction::Right);
        let (head, _, _) = moved(state.advance());
        assert_eq!(head, Position::new(7, 6));
    }

    #[test]
    fn test_normal_pickup_grows_and_scores() {
        let mut state = GameState::new();
        state.set_entity(EntitySlot::Powerup(PowerupKind::Normal), Position::new(7, 6));

        let adv = state.advance();
        assert_eq!(
            adv.pickup,
            Some(Pickup {
                kind: PowerupKind::Normal,
                pos: Position::new(7, 6),
                score: 1,
            })
        );
        let (head, tail_removed, tail) = moved(adv);
        assert_eq!(head, Position::new(7, 6));
        assert!(!tail_removed);
        assert_eq!(tail, Position::new(3, 6));

        assert_eq!(state.len(), 5);
        assert_eq!(state.score(), 1);
        assert_eq!(state.tail(), Position::new(3, 6));
        assert!(state.entity(EntitySlot::Powerup(PowerupKind::Normal)).is_none());
        assert!(body_distinct(&state));

        // Next tick drops the old tail again.
        let (_, tail_removed, _) = moved(state.advance());
        assert!(tail_removed);
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_special_pickup_scores_five() {
        let mut state = GameState::new();
        state.set_entity(EntitySlot::Powerup(PowerupKind::Special), Position::new(7, 6));

        let adv = state.advance();
        assert_eq!(adv.pickup.map(|p| p.kind), Some(PowerupKind::Special));
        assert_eq!(state.score(), 5);
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_self_collision_includes_tail() {
        // Head at (5,5) heading down into the tail at (5,6).
        let body = [
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
        ];
        let mut state = GameState::from_body(&body, Direction::Down).unwrap();
        let before = state.clone();

        let adv = state.advance();
        assert_eq!(adv.outcome, AdvanceOutcome::Lost(LossCause::SelfCollision));
        assert_eq!(state, before);
    }

    #[test]
    fn test_enemy_collision() {
        let mut state = GameState::new();
        state.set_entity(EntitySlot::Enemy, Position::new(7, 6));
        let adv = state.advance();
        assert_eq!(adv.outcome, AdvanceOutcome::Lost(LossCause::EnemyCollision));
    }

    #[test]
    fn test_reaching_capacity_wins() {
        let body: Vec<Position> = (0..(MAX_SNAKE_LENGTH - 1) as i32)
            .map(|i| Position::new(i % GRID_WIDTH, i / GRID_WIDTH))
            .rev()
            .collect();
        // Head is (0,4); body runs along rows 0..=3 left to right, then (0,4).
        let mut state = GameState::from_body(&body, Direction::Right).unwrap();
        state.set_entity(EntitySlot::Powerup(PowerupKind::Normal), Position::new(1, 4));

        let adv = state.advance();
        assert_eq!(adv.outcome, AdvanceOutcome::Won);
        assert_eq!(adv.pickup.map(|p| p.score), Some(1));
        assert_eq!(state.len(), MAX_SNAKE_LENGTH);
    }

    #[test]
    fn test_stacked_powerups_at_capacity_win_without_overflow() {
        let body: Vec<Position> = (0..(MAX_SNAKE_LENGTH - 1) as i32)
            .map(|i| Position::new(i % GRID_WIDTH, i / GRID_WIDTH))
            .rev()
            .collect();
        let mut state = GameState::from_body(&body, Direction::Right).unwrap();
        // Both powerups on the cell ahead: only one more segment fits.
        state.set_entity(EntitySlot::Powerup(PowerupKind::Normal), Position::new(1, 4));
        state.set_entity(EntitySlot::Powerup(PowerupKind::Special), Position::new(1, 4));

        let adv = state.advance();
        assert_eq!(adv.outcome, AdvanceOutcome::Won);
        assert_eq!(adv.pickup.map(|p| p.score), Some(6));
        assert_eq!(state.len(), MAX_SNAKE_LENGTH);

        // Advancing a full body onto another powerup still wins.
        state.set_entity(EntitySlot::Powerup(PowerupKind::Normal), state.next_head());
        let adv = state.advance();
        assert_eq!(adv.outcome, AdvanceOutcome::Won);
        assert_eq!(state.len(), MAX_SNAKE_LENGTH);
    }

    #[test]
    fn test_free_for_ignores_own_slot() {
        let mut state = GameState::new();
        let spot = Position::new(0, 0);
        state.set_entity(EntitySlot::Enemy, spot);

        assert!(state.is_free_for(EntitySlot::Enemy, spot));
        assert!(!state.is_free_for(EntitySlot::Powerup(PowerupKind::Normal), spot));
        assert!(!state.is_free_for(EntitySlot::Enemy, state.head()));
    }

    #[test]
    fn test_from_body_rejects_bad_bodies() {
        assert!(GameState::from_body(&[], Direction::Up).is_none());
        assert!(GameState::from_body(&[Position::new(12, 0)], Direction::Up).is_none());
        assert!(GameState::from_body(
            &[Position::new(1, 1), Position::new(1, 1)],
            Direction::Up
        )
        .is_none());
    }
}
