//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick
//! - Seeded RNG only
//! - No rendering, input or storage dependencies

pub mod clock;
pub mod state;
pub mod tick;

pub use clock::TickClock;
pub use state::{Direction, GamePhase, GameState, Snake};
pub use tick::{TickInput, TickOutcome, idle_direction, tick};
