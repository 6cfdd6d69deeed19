//! Snake Unlocks entry point
//!
//! The native binary runs headless idle-mode games against the real save
//! file, which exercises the full tick → progression → persistence loop.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use snake_unlocks::persistence::FileStore;
    use snake_unlocks::progression::FirstLocked;
    use snake_unlocks::session::{GameSession, MenuCommand, SessionPhase};
    use snake_unlocks::sim::TickClock;
    use snake_unlocks::Settings;

    /// Hard stop for a single idle game that never crashes
    const MAX_TICKS_PER_GAME: u32 = 20_000;

    env_logger::init();
    log::info!("Snake Unlocks (native) starting...");

    let settings = Settings::from_env();
    let games: u32 = match std::env::var("SNAKE_DEMO_GAMES") {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Ignoring SNAKE_DEMO_GAMES={:?}: {}", raw, e);
            3
        }),
        Err(_) => 3,
    };
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let store = FileStore::new(settings.save_path.clone());
    let tick_interval = settings.tick_interval();
    let mode = settings.mode;
    let mut session = GameSession::new(settings, store, seed);
    session.set_idle_mode(true);

    let mut clock = TickClock::new(session.settings().tick_rate_hz);

    for game in 1..=games {
        session.handle(MenuCommand::Start(mode));
        let mut ticks = 0;
        let mut last = Instant::now();

        while session.phase() == SessionPhase::Playing && ticks < MAX_TICKS_PER_GAME {
            let steps = match tick_interval {
                Some(_) => {
                    std::thread::sleep(clock.until_next());
                    let now = Instant::now();
                    let steps = clock.advance(now - last);
                    last = now;
                    steps
                }
                None => 1,
            };
            for _ in 0..steps {
                session.step(&mut FirstLocked);
                ticks += 1;
            }
        }

        match session.last_summary() {
            Some(summary) => println!(
                "Game {}: {} apples in {} ticks, {} new colours, {} new skins",
                game,
                summary.apples,
                ticks,
                summary.unlocked_colors.len(),
                summary.unlocked_skins.len()
            ),
            None => println!("Game {}: stopped after {} ticks", game, ticks),
        }
        session.handle(MenuCommand::MainMenu);
        clock.reset();
    }

    let stats = session.statistics();
    let selected = session.selected_cosmetic();
    session.handle(MenuCommand::Quit);

    println!("\nStatistics");
    println!("  Games played:   {}", stats.games_played);
    println!("  Total deaths:   {}", stats.total_deaths);
    println!("  Total apples:   {}", stats.total_apples);
    println!(
        "  Apple milestones reached: {:?} of {:?}",
        stats.apple_milestones_reached, stats.apple_milestones
    );
    println!(
        "  Game milestones reached:  {:?} of {:?}",
        stats.game_milestones_reached, stats.game_milestones
    );
    println!("  Unlocked cosmetics: {}", stats.unlocked_count);
    println!("  Selected: {}", selected.display_name());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build is driven by the host page through the library API
}
