//! Game settings and preferences
//!
//! Defaults can be overridden from the environment on native builds.

use std::path::PathBuf;
use std::time::Duration;

use crate::consts::TICK_RATE_HZ;

/// Difficulty/presentation mode picked on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Grid lines drawn to help judge distances
    #[default]
    Easy,
    /// Bare board
    Medium,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Easy => "Easy",
            GameMode::Medium => "Medium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(GameMode::Easy),
            "medium" | "med" | "m" => Some(GameMode::Medium),
            _ => None,
        }
    }

    /// Whether the renderer should draw grid lines
    pub fn shows_grid(&self) -> bool {
        match self {
            GameMode::Easy => true,
            GameMode::Medium => false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Mode used when a game starts without an explicit choice
    pub mode: GameMode,
    /// Simulation steps per second (0 = run as fast as possible)
    pub tick_rate_hz: u32,
    /// Where progress is saved on native builds
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Easy,
            tick_rate_hz: TICK_RATE_HZ,
            save_path: PathBuf::from("data.json"),
        }
    }
}

impl Settings {
    /// Environment variable overriding the game mode
    pub const ENV_MODE: &'static str = "SNAKE_MODE";
    /// Environment variable overriding the tick rate
    pub const ENV_TICK_RATE: &'static str = "SNAKE_TICK_RATE";
    /// Environment variable overriding the save path
    pub const ENV_SAVE_PATH: &'static str = "SNAKE_SAVE_PATH";

    /// Defaults with any environment overrides applied
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Apply overrides from a key lookup; unparseable values are logged and ignored
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(Self::ENV_MODE) {
            match GameMode::from_str(&raw) {
                Some(mode) => self.mode = mode,
                None => log::warn!("Ignoring {}={:?}: unknown mode", Self::ENV_MODE, raw),
            }
        }
        if let Some(raw) = lookup(Self::ENV_TICK_RATE) {
            match raw.trim().parse::<u32>() {
                Ok(rate) => self.tick_rate_hz = rate,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", Self::ENV_TICK_RATE, raw, e),
            }
        }
        if let Some(raw) = lookup(Self::ENV_SAVE_PATH) {
            if raw.trim().is_empty() {
                log::warn!("Ignoring empty {}", Self::ENV_SAVE_PATH);
            } else {
                self.save_path = PathBuf::from(raw);
            }
        }
    }

    /// Wall-clock time per step, None when unthrottled
    pub fn tick_interval(&self) -> Option<Duration> {
        if self.tick_rate_hz == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / self.tick_rate_hz)
        }
    }
}
