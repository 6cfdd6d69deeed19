//! One play session: simulation + progression + storage
//!
//! The presentation layer talks only to [`GameSession`]: it forwards
//! directions and menu commands, calls [`GameSession::step`] once per tick,
//! and reads state back for drawing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::cosmetics::{Cosmetic, Rgb, SkinId};
use crate::persistence::ProgressStore;
use crate::progression::{Progression, Statistics, UnlockChooser};
use crate::settings::{GameMode, Settings};
use crate::sim::{Direction, GameState, TickInput, TickOutcome, tick};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    Playing,
    GameOver,
    Quit,
}

/// Menu selections from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start(GameMode),
    SelectCosmetic(usize),
    Retry,
    MainMenu,
    Quit,
}

/// What the last game earned, for the game-over screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSummary {
    pub apples: u32,
    pub unlocked_colors: Vec<Rgb>,
    pub unlocked_skins: Vec<SkinId>,
}

pub struct GameSession<S: ProgressStore> {
    settings: Settings,
    store: S,
    progression: Progression,
    game: GameState,
    mode: GameMode,
    phase: SessionPhase,
    /// Direction requested since the last tick
    requested: Option<Direction>,
    idle_mode: bool,
    /// Source of per-game seeds
    rng: Pcg32,
    last_summary: Option<GameSummary>,
}

impl<S: ProgressStore> GameSession<S> {
    /// Load progress from `store` and open on the main menu
    pub fn new(settings: Settings, store: S, seed: u64) -> Self {
        let progression = Progression::new(store.load());
        let mut rng = Pcg32::seed_from_u64(seed);
        let game = GameState::new(rng.random());
        log::info!("Session started with seed {}", seed);

        Self {
            mode: settings.mode,
            settings,
            store,
            progression,
            game,
            phase: SessionPhase::Menu,
            requested: None,
            idle_mode: false,
            rng,
            last_summary: None,
        }
    }

    pub fn handle(&mut self, command: MenuCommand) {
        match command {
            MenuCommand::Start(mode) => self.start(mode),
            MenuCommand::SelectCosmetic(index) => {
                self.select_cosmetic(index);
            }
            MenuCommand::Retry => self.retry(),
            MenuCommand::MainMenu => self.main_menu(),
            MenuCommand::Quit => self.quit(),
        }
    }

    /// Begin a fresh game in `mode`
    pub fn start(&mut self, mode: GameMode) {
        if self.phase == SessionPhase::Quit {
            return;
        }
        self.mode = mode;
        self.game = GameState::new(self.rng.random());
        self.progression.start_game();
        self.requested = None;
        self.last_summary = None;
        self.phase = SessionPhase::Playing;
        log::info!("Started {} game (seed {})", mode.as_str(), self.game.seed);
    }

    /// Play again in the same mode (game-over screen only)
    pub fn retry(&mut self) {
        if self.phase == SessionPhase::GameOver {
            self.start(self.mode);
        }
    }

    pub fn main_menu(&mut self) {
        if self.phase != SessionPhase::Quit {
            self.phase = SessionPhase::Menu;
        }
    }

    /// Flush progress and stop accepting input
    pub fn quit(&mut self) {
        if self.phase == SessionPhase::Quit {
            return;
        }
        self.persist();
        self.phase = SessionPhase::Quit;
        log::info!("Session closed");
    }

    /// Request a heading for the next tick; later requests replace earlier ones
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.phase == SessionPhase::Playing {
            self.requested = Some(direction);
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Advance the running game by one tick.
    ///
    /// Returns None when no game is running. When the game ends, pending
    /// apple milestones are paid out through `chooser` before the game is
    /// counted, then progress is saved.
    pub fn step(&mut self, chooser: &mut impl UnlockChooser) -> Option<TickOutcome> {
        if self.phase != SessionPhase::Playing {
            return None;
        }

        let input = TickInput {
            direction: self.requested.take(),
            idle_mode: self.idle_mode,
        };
        let outcome = tick(&mut self.game, &input);

        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::AteApple => {
                if let Some(milestone) = self.progression.on_apple_eaten() {
                    log::info!("Reached {} apples, unlock pending", milestone);
                }
                self.persist();
            }
            TickOutcome::Collided => {}
        }

        if self.game.is_over() {
            self.finish_game(chooser);
        }
        Some(outcome)
    }

    fn finish_game(&mut self, chooser: &mut impl UnlockChooser) {
        let unlocked_colors = self.progression.resolve_pending_apple_milestones(chooser);
        let unlocked_skins = self.progression.on_game_ended();
        self.persist();

        let summary = GameSummary {
            apples: self.game.apple_count,
            unlocked_colors,
            unlocked_skins,
        };
        log::info!(
            "Game over: {} apples, {} new colours, {} new skins",
            summary.apples,
            summary.unlocked_colors.len(),
            summary.unlocked_skins.len()
        );
        self.last_summary = Some(summary);
        self.phase = SessionPhase::GameOver;
    }

    /// Select the unlocked cosmetic at `index`; invalid indices are ignored
    pub fn select_cosmetic(&mut self, index: usize) -> bool {
        if self.phase == SessionPhase::Quit {
            return false;
        }
        let changed = self.progression.select_cosmetic(index);
        if changed {
            self.persist();
        }
        changed
    }

    /// Save progress; a failed write is logged and play continues
    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.progression.record()) {
            log::warn!("Failed to save progress: {:#}", e);
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn shows_grid(&self) -> bool {
        self.mode.shows_grid()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn selected_cosmetic(&self) -> Cosmetic {
        self.progression.selected()
    }

    pub fn statistics(&self) -> Statistics {
        self.progression.statistics()
    }

    pub fn last_summary(&self) -> Option<&GameSummary> {
        self.last_summary.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosmetics::GREEN;
    use crate::persistence::MemoryStore;
    use crate::progression::FirstLocked;
    use glam::IVec2;

    fn session() -> GameSession<MemoryStore> {
        GameSession::new(Settings::default(), MemoryStore::new(), 42)
    }

    /// Put the apple directly in front of the head
    fn bait(session: &mut GameSession<MemoryStore>) {
        let game = &mut session.game;
        game.apple = crate::wrap_cell(game.snake.head() + game.snake.direction.delta());
    }

    /// Park the apple where a snake heading right along its row won't reach it
    fn park_apple(session: &mut GameSession<MemoryStore>) {
        let row = session.game.snake.head().y;
        session.game.apple = IVec2::new(0, (row + 10) % crate::consts::BOARD_SIZE);
    }

    /// Turn into the body: Up, Left, Down closes a loop on a snake of 5+
    fn crash(session: &mut GameSession<MemoryStore>) -> TickOutcome {
        park_apple(session);
        for dir in [Direction::Up, Direction::Left, Direction::Down] {
            session.queue_direction(dir);
            let outcome = session.step(&mut FirstLocked).unwrap();
            if outcome == TickOutcome::Collided {
                return outcome;
            }
            park_apple(session);
        }
        TickOutcome::Moved
    }

    #[test]
    fn test_opens_on_menu() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Menu);
        assert_eq!(s.step(&mut FirstLocked), None);
        assert_eq!(s.selected_cosmetic(), Cosmetic::SolidColor(GREEN));
    }

    #[test]
    fn test_queued_direction_applies_next_tick() {
        let mut s = session();
        s.start(GameMode::Medium);
        park_apple(&mut s);
        s.queue_direction(Direction::Up);
        s.queue_direction(Direction::Down);
        s.step(&mut FirstLocked);
        assert_eq!(s.game().snake.direction, Direction::Down);
        assert_eq!(s.game().snake.head(), IVec2::new(10, 11));
        assert!(!s.shows_grid());

        // Request is consumed
        park_apple(&mut s);
        s.step(&mut FirstLocked);
        assert_eq!(s.game().snake.head(), IVec2::new(10, 12));
    }

    #[test]
    fn test_apple_saves_progress() {
        let mut s = session();
        s.start(GameMode::Easy);
        bait(&mut s);
        assert_eq!(s.step(&mut FirstLocked), Some(TickOutcome::AteApple));
        assert_eq!(s.game().snake.len(), 4);
        assert_eq!(s.progression().game_apples(), 1);
        assert_eq!(s.store().saves, 1);
        assert_eq!(s.store().load().total_apples, 1);
    }

    #[test]
    fn test_milestone_paid_at_game_over() {
        let mut s = session();
        s.start(GameMode::Easy);
        for _ in 0..10 {
            bait(&mut s);
            assert_eq!(s.step(&mut FirstLocked), Some(TickOutcome::AteApple));
        }
        assert_eq!(s.progression().pending_apple_milestones(), &[10]);
        assert_eq!(s.progression().unlocked().len(), 1);

        assert_eq!(crash(&mut s), TickOutcome::Collided);
        assert_eq!(s.phase(), SessionPhase::GameOver);

        let summary = s.last_summary().unwrap();
        assert_eq!(summary.apples, 10);
        assert_eq!(summary.unlocked_colors, vec![Rgb(0, 0, 255)]);

        let saved = s.store().load();
        assert_eq!(saved.apple_milestones_reached, vec![10]);
        assert_eq!(saved.total_deaths, 1);
        assert_eq!(saved.games_played, 1);
        assert_eq!(saved.unlocked.len(), 2);
    }

    #[test]
    fn test_retry_and_menu() {
        let mut s = session();
        s.retry();
        assert_eq!(s.phase(), SessionPhase::Menu);

        s.handle(MenuCommand::Start(GameMode::Medium));
        for _ in 0..2 {
            bait(&mut s);
            s.step(&mut FirstLocked);
        }
        crash(&mut s);
        assert_eq!(s.phase(), SessionPhase::GameOver);
        let first_seed = s.game().seed;

        s.handle(MenuCommand::Retry);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.mode(), GameMode::Medium);
        assert_eq!(s.game().snake.len(), 3);
        assert_ne!(s.game().seed, first_seed);
        assert_eq!(s.progression().game_apples(), 0);

        s.handle(MenuCommand::MainMenu);
        assert_eq!(s.phase(), SessionPhase::Menu);
    }

    #[test]
    fn test_select_cosmetic_saves_only_on_change() {
        let mut s = GameSession::new(
            Settings::default(),
            MemoryStore::with_document(
                r#"{"unlocked_colors": [[0, 255, 0], "purple_hollow"], "snake_color": [0, 255, 0]}"#,
            ),
            1,
        );
        s.handle(MenuCommand::SelectCosmetic(7));
        assert_eq!(s.store().saves, 0);
        assert!(s.select_cosmetic(1));
        assert_eq!(s.store().saves, 1);
        assert_eq!(s.selected_cosmetic(), Cosmetic::NamedSkin(SkinId::PurpleHollow));
        assert_eq!(
            s.store().load().selected,
            Cosmetic::NamedSkin(SkinId::PurpleHollow)
        );
    }

    #[test]
    fn test_fifth_game_unlocks_skin() {
        let mut s = GameSession::new(
            Settings::default(),
            MemoryStore::with_document(r#"{"games_played": 4, "total_deaths": 4}"#),
            9,
        );
        s.start(GameMode::Easy);
        for _ in 0..2 {
            bait(&mut s);
            s.step(&mut FirstLocked);
        }
        crash(&mut s);
        assert_eq!(
            s.last_summary().unwrap().unlocked_skins,
            vec![SkinId::YellowHollow]
        );
        assert_eq!(s.statistics().games_played, 5);
    }

    #[test]
    fn test_quit_flushes_and_locks() {
        let mut s = session();
        s.start(GameMode::Easy);
        s.handle(MenuCommand::Quit);
        assert_eq!(s.phase(), SessionPhase::Quit);
        assert_eq!(s.store().saves, 1);
        s.start(GameMode::Easy);
        assert_eq!(s.phase(), SessionPhase::Quit);
        assert_eq!(s.step(&mut FirstLocked), None);
    }

    #[test]
    fn test_selection_ignored_after_quit() {
        let mut s = GameSession::new(
            Settings::default(),
            MemoryStore::with_document(
                r#"{"unlocked_colors": [[0, 255, 0], "red_hollow"], "snake_color": [0, 255, 0]}"#,
            ),
            3,
        );
        s.quit();
        assert_eq!(s.store().saves, 1);
        assert!(!s.select_cosmetic(1));
        s.handle(MenuCommand::SelectCosmetic(1));
        assert_eq!(s.store().saves, 1);
        assert_eq!(s.selected_cosmetic(), Cosmetic::SolidColor(GREEN));
        assert_eq!(s.store().load().selected, Cosmetic::SolidColor(GREEN));
    }

    #[test]
    fn test_idle_session_plays_to_game_over() {
        let mut s = session();
        s.set_idle_mode(true);
        s.start(GameMode::Easy);
        let mut ticks = 0;
        while s.phase() == SessionPhase::Playing && ticks < 20_000 {
            s.step(&mut FirstLocked);
            ticks += 1;
        }
        // Either the snake crashed or it is still going; both leave valid state
        let stats = s.statistics();
        assert_eq!(stats.total_apples, u64::from(s.game().apple_count));
        if s.phase() == SessionPhase::GameOver {
            assert_eq!(stats.games_played, 1);
        }
    }
}
