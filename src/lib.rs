//! Snake Unlocks - A grid Snake game with milestone cosmetic unlocks
//!
//! Core modules:
//! - `sim`: Deterministic grid simulation (movement, wrap-around, apples)
//! - `cosmetics`: Solid colours and named skins the player can unlock
//! - `progression`: Lifetime counters, milestones and unlock decisions
//! - `persistence`: Load/save of the progression record
//! - `session`: One game session wiring the above together
//! - `settings`: Player-facing configuration

pub mod cosmetics;
pub mod persistence;
pub mod progression;
pub mod session;
pub mod settings;
pub mod sim;

pub use cosmetics::{Cosmetic, Rgb, SkinId};
pub use progression::{Progression, ProgressionRecord, Statistics, UnlockChooser};
pub use session::{GameSession, SessionPhase};
pub use settings::{GameMode, Settings};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Board is BOARD_SIZE x BOARD_SIZE cells
    pub const BOARD_SIZE: i32 = 20;
    /// Total number of cells on the board
    pub const BOARD_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

    /// Default simulation rate (steps per second)
    pub const TICK_RATE_HZ: u32 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Snake spawn layout, head first
    pub const SNAKE_START: [IVec2; 3] = [
        IVec2::new(10, 10),
        IVec2::new(9, 10),
        IVec2::new(8, 10),
    ];

    /// Per-game apple counts that award a colour of the player's choice
    pub const APPLE_MILESTONES: [u32; 11] = [10, 20, 25, 30, 40, 50, 60, 70, 80, 90, 100];
    /// Games-played counts that award a named skin
    pub const GAME_PLAYED_MILESTONES: [u32; 3] = [5, 10, 15];
}

/// Wrap a cell onto the board (each axis modulo BOARD_SIZE)
#[inline]
pub fn wrap_cell(cell: IVec2) -> IVec2 {
    IVec2::new(
        cell.x.rem_euclid(consts::BOARD_SIZE),
        cell.y.rem_euclid(consts::BOARD_SIZE),
    )
}

/// Shortest distance along one wrapped axis
#[inline]
pub fn wrapped_axis_distance(a: i32, b: i32) -> i32 {
    let d = (a - b).rem_euclid(consts::BOARD_SIZE);
    d.min(consts::BOARD_SIZE - d)
}

/// Manhattan distance on the wrapping board
#[inline]
pub fn wrapped_distance(a: IVec2, b: IVec2) -> i32 {
    wrapped_axis_distance(a.x, b.x) + wrapped_axis_distance(a.y, b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_cell() {
        assert_eq!(wrap_cell(IVec2::new(20, 5)), IVec2::new(0, 5));
        assert_eq!(wrap_cell(IVec2::new(-1, -1)), IVec2::new(19, 19));
        assert_eq!(wrap_cell(IVec2::new(7, 19)), IVec2::new(7, 19));
    }

    #[test]
    fn test_wrapped_distance() {
        assert_eq!(wrapped_distance(IVec2::new(0, 0), IVec2::new(19, 0)), 1);
        assert_eq!(wrapped_distance(IVec2::new(0, 0), IVec2::new(10, 10)), 20);
        assert_eq!(wrapped_distance(IVec2::new(3, 4), IVec2::new(3, 4)), 0);
    }
}
