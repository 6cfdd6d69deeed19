//! Fixed timestep simulation tick
//!
//! Advances the snake exactly one cell per call.

use super::state::{Direction, GamePhase, GameState};
use crate::wrap_cell;
use crate::wrapped_distance;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Requested heading; ignored if it reverses the current one
    pub direction: Option<Direction>,
    /// Idle/demo mode - the simulation steers itself
    pub idle_mode: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    AteApple,
    Collided,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome::Collided;
    }

    let requested = if input.idle_mode {
        Some(idle_direction(state))
    } else {
        input.direction
    };
    match requested {
        Some(dir) if !dir.is_opposite(state.snake.direction) => state.snake.direction = dir,
        _ => {}
    }

    state.time_ticks += 1;

    let new_head = wrap_cell(state.snake.head() + state.snake.direction.delta());

    // Checked against the whole body before the tail moves, so chasing the
    // tail into the cell it is about to vacate still counts as a collision.
    if state.snake.occupies(new_head) {
        log::debug!("Collision at {:?} after {} ticks", new_head, state.time_ticks);
        state.phase = GamePhase::GameOver;
        return TickOutcome::Collided;
    }

    state.snake.body.insert(0, new_head);

    if new_head == state.apple {
        // Keep the tail: growth by one
        state.apple_count += 1;
        match state.random_free_cell() {
            Some(cell) => state.apple = cell,
            None => {
                log::info!("Board full after {} apples", state.apple_count);
                state.phase = GamePhase::GameOver;
            }
        }
        return TickOutcome::AteApple;
    }

    state.snake.body.pop();
    TickOutcome::Moved
}

/// Greedy steering for idle mode: the safe non-reversing move that ends
/// closest to the apple, or straight ahead if every move is blocked.
pub fn idle_direction(state: &GameState) -> Direction {
    let current = state.snake.direction;
    let head = state.snake.head();

    Direction::ALL
        .into_iter()
        .filter(|dir| !dir.is_opposite(current))
        .map(|dir| (dir, wrap_cell(head + dir.delta())))
        .filter(|(_, cell)| !state.snake.occupies(*cell))
        .min_by_key(|(dir, cell)| {
            // Prefer going straight on ties
            (wrapped_distance(*cell, state.apple), *dir != current)
        })
        .map(|(dir, _)| dir)
        .unwrap_or(current)
}
