//! Flappy Drift - native entry point
//!
//! Runs a headless autopilot session at a fixed 60 Hz, logging the HUD once a
//! second and flushing scores and coins into the save directory. The browser
//! build is driven through `platform::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use flappy_drift::persistence::FileStorage;
    use flappy_drift::platform::FrameLimiter;
    use flappy_drift::sim::{GameEvent, SeededRng};
    use flappy_drift::tuning::TICK_RATE_HZ;
    use flappy_drift::{App, Command, Difficulty, Screen};

    /// Headless autopilot run of Flappy Drift.
    #[derive(Debug, Parser)]
    #[command(version, about, long_about = None)]
    struct Cli {
        /// Difficulty tier (easy, normal, hardcore); defaults to the saved setting.
        #[arg(long, value_name = "TIER")]
        difficulty: Option<Difficulty>,
        /// Stop after this many ticks even if the bird is still flying.
        #[arg(
            long,
            value_name = "TICKS",
            default_value_t = 60 * u64::from(TICK_RATE_HZ),
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        ticks: u64,
        /// Seed for pipe placement; random when omitted.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
        /// Run as fast as possible instead of at 60 Hz.
        #[arg(long)]
        unlimited: bool,
        /// Directory holding the save files.
        #[arg(long, value_name = "PATH", default_value = "save")]
        data_dir: PathBuf,
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let cli = Cli::parse();

        let seed = cli.seed.unwrap_or_else(|| SeededRng::from_entropy().seed());
        log::info!("Flappy Drift (native) starting with seed {seed}");

        let mut app = App::new(Box::new(FileStorage::new(&cli.data_dir)), seed);
        if let Some(difficulty) = cli.difficulty {
            app.settings.difficulty = difficulty;
        }
        app.autopilot = true;

        if let Err(e) = app.apply(Command::StartGame) {
            log::error!("Could not start a session: {e}");
            return ExitCode::FAILURE;
        }

        let mut limiter = FrameLimiter::new(TICK_RATE_HZ);
        let mut passes = 0u32;
        for t in 1..=cli.ticks {
            for event in app.update() {
                match event {
                    GameEvent::Passed { kind, points, .. } => {
                        passes += 1;
                        log::debug!("Pass #{passes}: {kind:?} +{points}");
                    }
                    GameEvent::SpeedUp { speed } => log::info!("Speed up: {speed:.1}"),
                    GameEvent::Hit { collisions } => log::info!("Hit ({collisions})"),
                    _ => {}
                }
            }

            if app.screen() == Screen::GameOver {
                break;
            }
            if t % u64::from(TICK_RATE_HZ) == 0 {
                if let Some(session) = app.session() {
                    let hud = session.hud();
                    log::info!(
                        "t={}s score {} combo {} speed {:.1} y {:.0} rank {:?}",
                        t / u64::from(TICK_RATE_HZ),
                        hud.score,
                        hud.combo,
                        hud.speed,
                        hud.player_y,
                        app.projected_rank()
                    );
                }
            }
            if !cli.unlimited {
                limiter.wait();
            }
        }

        match app.last_report() {
            Some(report) => {
                let s = &report.summary;
                log::info!(
                    "Game over ({:?}): score {}, {} perfect, {} near misses, max combo {}, \
                     {} coins",
                    s.cause,
                    s.score,
                    s.perfect_passes,
                    s.near_misses,
                    s.max_combo,
                    s.coins_earned
                );
                if report.new_high_score {
                    log::info!("New high score!");
                }
                if let Some(rank) = report.rank {
                    log::info!("Leaderboard rank #{rank}");
                }
            }
            None => {
                if let Some(session) = app.session() {
                    log::info!("Tick limit reached still flying: score {}", session.score);
                }
                // Leaving play mid-session keeps the wallet but records no score
                if let Err(e) = app.apply(Command::Back) {
                    log::warn!("{e}");
                }
            }
        }

        if limiter.overruns() > 0 {
            log::debug!("{} frames overran the budget", limiter.overruns());
        }
        log::info!(
            "Wallet: {} coins, high score {}, leaderboard top {:?}",
            app.settings.coins,
            app.settings.high_score,
            app.high_scores.top_score()
        );
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
