//! Game state and core simulation types
//!
//! Everything one game needs lives in [`GameState`]; nothing is global.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Snake is moving
    Playing,
    /// Snake ran into itself (or filled the board)
    GameOver,
}

/// Movement direction on the grid (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector for one step
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// The snake body, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<IVec2>,
    pub direction: Direction,
}

impl Default for Snake {
    fn default() -> Self {
        Self {
            body: SNAKE_START.to_vec(),
            direction: Direction::Right,
        }
    }
}

impl Snake {
    #[inline]
    pub fn head(&self) -> IVec2 {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        self.body.contains(&cell)
    }
}

/// Complete state of one game (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this game was started with
    pub seed: u64,
    /// Apple placement RNG
    rng: Pcg32,
    pub snake: Snake,
    pub apple: IVec2,
    /// Apples eaten this game
    pub apple_count: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: Snake::default(),
            apple: IVec2::ZERO,
            apple_count: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
        };
        state.reset();
        state
    }

    /// Put the snake back at the start and place a fresh apple.
    ///
    /// The RNG keeps running, so consecutive resets do not repeat apples.
    pub fn reset(&mut self) {
        self.snake = Snake::default();
        self.apple_count = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        // The start snake never fills the board
        if let Some(apple) = self.random_free_cell() {
            self.apple = apple;
        }
    }

    /// Uniformly random cell not on the snake, or None if the board is full
    pub fn random_free_cell(&mut self) -> Option<IVec2> {
        if self.snake.len() >= BOARD_CELLS {
            return None;
        }
        loop {
            let cell = IVec2::new(
                self.rng.random_range(0..BOARD_SIZE),
                self.rng.random_range(0..BOARD_SIZE),
            );
            if !self.snake.occupies(cell) {
                return Some(cell);
            }
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(7);
        assert_eq!(state.snake.body, SNAKE_START.to_vec());
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.apple_count, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.snake.occupies(state.apple));
    }

    #[test]
    fn test_same_seed_same_apple() {
        assert_eq!(GameState::new(99).apple, GameState::new(99).apple);
    }

    #[test]
    fn test_apple_never_on_snake() {
        for seed in 0..200 {
            let state = GameState::new(seed);
            assert!(!state.snake.occupies(state.apple), "seed {}", seed);
            assert!(state.apple.x >= 0 && state.apple.x < BOARD_SIZE);
            assert!(state.apple.y >= 0 && state.apple.y < BOARD_SIZE);
        }
    }

    #[test]
    fn test_random_free_cell_full_board() {
        let mut state = GameState::new(1);
        state.snake.body = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| IVec2::new(x, y)))
            .collect();
        assert_eq!(state.random_free_cell(), None);
    }

    #[test]
    fn test_random_free_cell_single_gap() {
        let mut state = GameState::new(3);
        let gap = IVec2::new(13, 4);
        state.snake.body = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| IVec2::new(x, y)))
            .filter(|c| *c != gap)
            .collect();
        assert_eq!(state.random_free_cell(), Some(gap));
    }

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new(5);
        state.snake.body.push(IVec2::new(7, 10));
        state.apple_count = 12;
        state.phase = GamePhase::GameOver;
        state.reset();
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.apple_count, 0);
        assert!(!state.is_over());
    }
}
