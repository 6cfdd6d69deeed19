//! Lifetime progression: counters, milestones and cosmetic unlocks
//!
//! Apple milestones are counted per game and award a colour of the player's
//! choice once the game ends. Games-played milestones award a fixed named
//! skin immediately. A milestone only ever pays out once.

use serde::{Deserialize, Serialize};

use crate::consts::{APPLE_MILESTONES, GAME_PLAYED_MILESTONES};
use crate::cosmetics::{Cosmetic, PALETTE, Rgb, SkinId};

/// Times the chooser is asked before an unclaimed milestone is left for later
pub const MAX_CHOICE_ATTEMPTS: usize = 16;

/// Persisted progression summary
///
/// Field names match the save file keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRecord {
    /// Unlocked cosmetics in unlock order
    #[serde(rename = "unlocked_colors")]
    pub unlocked: Vec<Cosmetic>,
    /// Currently selected cosmetic (always one of `unlocked`)
    #[serde(rename = "snake_color")]
    pub selected: Cosmetic,
    /// Apple milestones already paid out
    #[serde(rename = "milestones_reached")]
    pub apple_milestones_reached: Vec<u32>,
    /// Games-played milestones already paid out
    #[serde(rename = "game_played_milestones_reached")]
    pub game_milestones_reached: Vec<u32>,
    pub total_apples: u64,
    pub total_deaths: u64,
    pub games_played: u64,
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            unlocked: vec![Cosmetic::default()],
            selected: Cosmetic::default(),
            apple_milestones_reached: Vec::new(),
            game_milestones_reached: Vec::new(),
            total_apples: 0,
            total_deaths: 0,
            games_played: 0,
        }
    }
}

impl ProgressionRecord {
    /// Restore the record invariants after loading from an untrusted source:
    /// the default colour is unlocked, nothing is listed twice, and the
    /// selection is one of the unlocked cosmetics.
    pub fn normalize(&mut self) {
        let mut unlocked: Vec<Cosmetic> = Vec::with_capacity(self.unlocked.len() + 1);
        for cosmetic in self.unlocked.drain(..) {
            if !unlocked.contains(&cosmetic) {
                unlocked.push(cosmetic);
            }
        }
        if !unlocked.contains(&Cosmetic::default()) {
            unlocked.insert(0, Cosmetic::default());
        }
        self.unlocked = unlocked;

        if !self.unlocked.contains(&self.selected) {
            self.selected = Cosmetic::default();
        }

        dedup_in_order(&mut self.apple_milestones_reached);
        dedup_in_order(&mut self.game_milestones_reached);
    }

    pub fn is_unlocked(&self, cosmetic: &Cosmetic) -> bool {
        self.unlocked.contains(cosmetic)
    }
}

fn dedup_in_order(values: &mut Vec<u32>) {
    let mut seen = Vec::with_capacity(values.len());
    values.retain(|v| {
        if seen.contains(v) {
            false
        } else {
            seen.push(*v);
            true
        }
    });
}

/// Picks a colour when an apple milestone pays out.
///
/// Gets the locked palette and returns an index into it. An out-of-range
/// index is ignored and the chooser is asked again; `None` declines, which
/// leaves the milestone unreached so a later game can earn it.
pub trait UnlockChooser {
    fn choose(&mut self, milestone: u32, locked: &[Rgb]) -> Option<usize>;
}

impl<F> UnlockChooser for F
where
    F: FnMut(u32, &[Rgb]) -> Option<usize>,
{
    fn choose(&mut self, milestone: u32, locked: &[Rgb]) -> Option<usize> {
        self(milestone, locked)
    }
}

/// Always takes the first locked colour (used by idle/demo play)
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLocked;

impl UnlockChooser for FirstLocked {
    fn choose(&mut self, _milestone: u32, locked: &[Rgb]) -> Option<usize> {
        if locked.is_empty() { None } else { Some(0) }
    }
}

/// Read model for the statistics screen
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub apple_milestones: Vec<u32>,
    pub game_milestones: Vec<u32>,
    pub apple_milestones_reached: Vec<u32>,
    pub game_milestones_reached: Vec<u32>,
    pub total_deaths: u64,
    pub total_apples: u64,
    pub games_played: u64,
    pub unlocked_count: usize,
}

/// Progression engine: owns the record plus per-game bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Progression {
    record: ProgressionRecord,
    /// Apples eaten in the current game
    game_apples: u32,
    /// Apple milestones hit this game, awaiting payout at game end
    pending_apple_milestones: Vec<u32>,
}

impl Progression {
    pub fn new(mut record: ProgressionRecord) -> Self {
        record.normalize();
        Self {
            record,
            game_apples: 0,
            pending_apple_milestones: Vec::new(),
        }
    }

    pub fn record(&self) -> &ProgressionRecord {
        &self.record
    }

    pub fn game_apples(&self) -> u32 {
        self.game_apples
    }

    pub fn pending_apple_milestones(&self) -> &[u32] {
        &self.pending_apple_milestones
    }

    pub fn selected(&self) -> Cosmetic {
        self.record.selected
    }

    pub fn unlocked(&self) -> &[Cosmetic] {
        &self.record.unlocked
    }

    /// Begin a new game: clears per-game counters, keeps lifetime ones
    pub fn start_game(&mut self) {
        self.game_apples = 0;
        self.pending_apple_milestones.clear();
    }

    /// Count an apple; returns the milestone queued by it, if any
    pub fn on_apple_eaten(&mut self) -> Option<u32> {
        self.record.total_apples += 1;
        self.game_apples += 1;

        let count = self.game_apples;
        if APPLE_MILESTONES.contains(&count)
            && !self.record.apple_milestones_reached.contains(&count)
            && !self.pending_apple_milestones.contains(&count)
        {
            log::debug!("Apple milestone {} queued", count);
            self.pending_apple_milestones.push(count);
            return Some(count);
        }
        None
    }

    /// Pay out every apple milestone queued this game.
    ///
    /// The chooser picks a colour from the locked palette and the milestone
    /// is marked reached once that colour is unlocked. Must run before
    /// [`Progression::on_game_ended`] when a game is lost so the losing game
    /// still earns its unlocks.
    pub fn resolve_pending_apple_milestones(
        &mut self,
        chooser: &mut impl UnlockChooser,
    ) -> Vec<Rgb> {
        let mut unlocked = Vec::new();

        for milestone in std::mem::take(&mut self.pending_apple_milestones) {
            if self.record.apple_milestones_reached.contains(&milestone) {
                continue;
            }

            let locked = self.locked_palette();
            if locked.is_empty() {
                log::debug!("Apple milestone {} reached with palette exhausted", milestone);
                self.record.apple_milestones_reached.push(milestone);
                continue;
            }

            match Self::ask(chooser, milestone, &locked) {
                Some(color) => {
                    self.record.apple_milestones_reached.push(milestone);
                    self.unlock(Cosmetic::SolidColor(color));
                    log::info!("Apple milestone {} unlocked colour {:?}", milestone, color);
                    unlocked.push(color);
                }
                None => {
                    log::info!("Apple milestone {} left unclaimed", milestone);
                }
            }
        }

        unlocked
    }

    /// Ask until the chooser names a locked colour, declines, or runs out of attempts
    fn ask(chooser: &mut impl UnlockChooser, milestone: u32, locked: &[Rgb]) -> Option<Rgb> {
        for _ in 0..MAX_CHOICE_ATTEMPTS {
            let index = chooser.choose(milestone, locked)?;
            match locked.get(index) {
                Some(&color) => return Some(color),
                None => log::debug!("Apple milestone {}: ignoring choice {}", milestone, index),
            }
        }
        log::warn!(
            "Apple milestone {}: no valid choice after {} attempts",
            milestone,
            MAX_CHOICE_ATTEMPTS
        );
        None
    }

    /// Count a finished game; returns any skins it unlocked
    pub fn on_game_ended(&mut self) -> Vec<SkinId> {
        self.record.total_deaths += 1;
        self.record.games_played += 1;

        let mut unlocked = Vec::new();
        let games = self.record.games_played;
        for milestone in GAME_PLAYED_MILESTONES {
            if u64::from(milestone) != games
                || self.record.game_milestones_reached.contains(&milestone)
            {
                continue;
            }
            self.record.game_milestones_reached.push(milestone);

            let Some(skin) = SkinId::for_games_played(milestone) else {
                continue;
            };
            if self.unlock(Cosmetic::NamedSkin(skin)) {
                log::info!("Games-played milestone {} unlocked {}", milestone, skin.display_name());
                unlocked.push(skin);
            }
        }
        unlocked
    }

    /// Add a cosmetic to the unlocked set; false if it was already there
    fn unlock(&mut self, cosmetic: Cosmetic) -> bool {
        if self.record.is_unlocked(&cosmetic) {
            return false;
        }
        self.record.unlocked.push(cosmetic);
        true
    }

    /// Select the unlocked cosmetic at `index`; out-of-range is a no-op.
    ///
    /// Returns true if the selection changed.
    pub fn select_cosmetic(&mut self, index: usize) -> bool {
        match self.record.unlocked.get(index) {
            Some(&cosmetic) if cosmetic != self.record.selected => {
                self.record.selected = cosmetic;
                log::info!("Selected cosmetic {}", cosmetic.display_name());
                true
            }
            _ => false,
        }
    }

    /// Palette colours not yet unlocked, in palette order
    pub fn locked_palette(&self) -> Vec<Rgb> {
        PALETTE
            .into_iter()
            .filter(|c| !self.record.is_unlocked(&Cosmetic::SolidColor(*c)))
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            apple_milestones: APPLE_MILESTONES.to_vec(),
            game_milestones: GAME_PLAYED_MILESTONES.to_vec(),
            apple_milestones_reached: self.record.apple_milestones_reached.clone(),
            game_milestones_reached: self.record.game_milestones_reached.clone(),
            total_deaths: self.record.total_deaths,
            total_apples: self.record.total_apples,
            games_played: self.record.games_played,
            unlocked_count: self.record.unlocked.len(),
        }
    }
}
