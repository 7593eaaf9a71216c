//! Application shell
//!
//! Owns everything that outlives a single session: settings, the leaderboard,
//! storage and the random source. Screen changes go through one transition
//! table so an impossible move is an error instead of a silent no-op.

use std::fmt;

use serde::Serialize;

use crate::error::AppError;
use crate::highscores::{self, HighScores};
use crate::persistence::Storage;
use crate::settings::Settings;
use crate::shop::{self, ItemKind};
use crate::sim::{self, GameEvent, SeededRng, SessionState, SessionSummary, TickInput};

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Settings,
    Shop,
    Credits,
    GameOver,
}

/// Requests that move between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartGame,
    OpenSettings,
    OpenShop,
    OpenCredits,
    /// Escape / back button; from play this is return-to-menu
    Back,
    /// Raised by `App::update` when the session reaches game over
    SessionEnded,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One credit line: role and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credit {
    pub role: &'static str,
    pub name: &'static str,
}

pub const CREDITS: [Credit; 2] = [
    Credit {
        role: "Lead Developer",
        name: "Daffa Aditya Pratama",
    },
    Credit {
        role: "Game Designer",
        name: "Samsul Bahrur",
    },
];

/// Screen reached by applying `command` in `screen`, if the move is legal
pub fn transition(screen: Screen, command: Command) -> Option<Screen> {
    use Command as C;
    use Screen as S;

    match (screen, command) {
        (S::Menu, C::StartGame) => Some(S::Playing),
        (S::Menu, C::OpenSettings) => Some(S::Settings),
        (S::Menu, C::OpenShop) => Some(S::Shop),
        (S::Menu, C::OpenCredits) => Some(S::Credits),
        (S::Settings | S::Shop | S::Credits, C::Back) => Some(S::Menu),
        (S::Playing, C::SessionEnded) => Some(S::GameOver),
        (S::Playing | S::GameOver, C::Back) => Some(S::Menu),
        _ => None,
    }
}

/// Result of the game-over flush
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameOverReport {
    pub summary: SessionSummary,
    pub new_high_score: bool,
    /// Leaderboard rank (1-indexed) if the session made the board
    pub rank: Option<usize>,
}

pub struct App {
    screen: Screen,
    pub settings: Settings,
    pub high_scores: HighScores,
    session: Option<SessionState>,
    rng: SeededRng,
    storage: Box<dyn Storage>,
    last_report: Option<GameOverReport>,
    /// Jump requested since the last update
    pending_jump: bool,
    /// Let the simulation fly itself
    pub autopilot: bool,
}

impl App {
    /// Load persisted state and sit on the menu
    pub fn new(storage: Box<dyn Storage>, seed: u64) -> Self {
        let settings = Settings::load(storage.as_ref());
        let high_scores = HighScores::load(storage.as_ref());
        log::info!(
            "App ready: difficulty {}, {} coins, high score {}",
            settings.difficulty,
            settings.coins,
            settings.high_score
        );

        Self {
            screen: Screen::Menu,
            settings,
            high_scores,
            session: None,
            rng: SeededRng::new(seed),
            storage,
            last_report: None,
            pending_jump: false,
            autopilot: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The live (or just-finished) session
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Leaderboard rank the live session's score would reach right now
    pub fn projected_rank(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        self.high_scores.potential_rank(session.score)
    }

    pub fn last_report(&self) -> Option<&GameOverReport> {
        self.last_report.as_ref()
    }

    /// Apply a screen command with its side effects
    pub fn apply(&mut self, command: Command) -> Result<Screen, AppError> {
        let from = self.screen;
        let Some(to) = transition(from, command) else {
            log::warn!("Ignoring {:?} on the {} screen", command, from);
            return Err(AppError::IllegalTransition {
                screen: from,
                command,
            });
        };

        match (from, command) {
            (_, Command::StartGame) => {
                let session = SessionState::new(self.settings.difficulty, &mut self.rng)?;
                log::info!(
                    "Session started on {} (seed {})",
                    session.difficulty,
                    self.rng.seed()
                );
                self.session = Some(session);
                self.pending_jump = false;
                self.last_report = None;
            }
            (_, Command::SessionEnded) => self.finish_session(),
            (Screen::Settings | Screen::Shop, Command::Back) => self.save_settings(),
            (Screen::Playing | Screen::GameOver, Command::Back) => {
                self.session = None;
                self.save_settings();
            }
            _ => {}
        }

        log::debug!("Screen {} -> {}", from, to);
        self.screen = to;
        Ok(to)
    }

    /// Queue a jump for the next update (only while playing)
    pub fn jump(&mut self) {
        if self.screen == Screen::Playing {
            self.pending_jump = true;
        }
    }

    /// Advance the session one tick.
    ///
    /// Coins from passes go straight into the wallet. When the tick ends the
    /// session the app moves to `GameOver` and flushes progress.
    pub fn update(&mut self) -> Vec<GameEvent> {
        if !matches!(self.screen, Screen::Playing | Screen::GameOver) {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
            autopilot: self.autopilot,
        };
        let events = sim::tick(session, &input, &mut self.rng);

        for event in &events {
            match event {
                GameEvent::Passed { coins, .. } => self.settings.add_coins(*coins),
                GameEvent::SpeedUp { speed } => log::debug!("Speed now {speed:.1}"),
                _ => {}
            }
        }

        if self.screen == Screen::Playing && session.is_game_over() {
            if let Err(e) = self.apply(Command::SessionEnded) {
                log::warn!("Failed to end session: {e}");
            }
        }

        events
    }

    /// Final tallies into settings and the leaderboard, then save both
    fn finish_session(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let summary = session.summary();

        let new_high_score = self.settings.record_session(summary.score);
        if new_high_score {
            log::info!("New high score: {}", summary.score);
        }
        let rank = self
            .high_scores
            .add_session(&summary, highscores::now_millis());
        if let Some(rank) = rank {
            log::info!("Leaderboard rank #{rank}");
        }

        if let Err(e) = self.high_scores.save(self.storage.as_mut()) {
            log::warn!("Failed to save high scores: {e}");
        }
        self.save_settings();

        self.last_report = Some(GameOverReport {
            summary,
            new_high_score,
            rank,
        });
    }

    /// Persist settings; failures are logged, never fatal
    pub fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.storage.as_mut()) {
            log::warn!("Failed to save settings: {e}");
        }
    }

    pub fn purchase(&mut self, kind: ItemKind, id: &str) -> Result<(), AppError> {
        shop::purchase(&mut self.settings, kind, id)?;
        Ok(())
    }

    pub fn equip(&mut self, kind: ItemKind, id: &str) -> Result<(), AppError> {
        shop::equip(&mut self.settings, kind, id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::tuning::Difficulty;

    fn app() -> App {
        App::new(Box::new(MemoryStorage::default()), 7)
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(transition(Screen::Menu, Command::StartGame), Some(Screen::Playing));
        assert_eq!(transition(Screen::Menu, Command::OpenShop), Some(Screen::Shop));
        assert_eq!(transition(Screen::Credits, Command::Back), Some(Screen::Menu));
        assert_eq!(
            transition(Screen::Playing, Command::SessionEnded),
            Some(Screen::GameOver)
        );
        assert_eq!(transition(Screen::GameOver, Command::Back), Some(Screen::Menu));

        assert_eq!(transition(Screen::Menu, Command::Back), None);
        assert_eq!(transition(Screen::Shop, Command::StartGame), None);
        assert_eq!(transition(Screen::GameOver, Command::SessionEnded), None);
        assert_eq!(transition(Screen::Playing, Command::OpenSettings), None);
    }

    #[test]
    fn test_illegal_transition_keeps_screen() {
        let mut app = app();
        let err = app.apply(Command::Back).unwrap_err();
        assert!(matches!(
            err,
            AppError::IllegalTransition {
                screen: Screen::Menu,
                command: Command::Back
            }
        ));
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn test_start_game_uses_settings_difficulty() {
        let mut app = app();
        app.settings.difficulty = Difficulty::Hardcore;
        app.apply(Command::StartGame).unwrap();
        assert_eq!(app.screen(), Screen::Playing);
        let session = app.session().unwrap();
        assert_eq!(session.difficulty, Difficulty::Hardcore);
        assert_eq!(session.speed, 4.5);
    }

    #[test]
    fn test_projected_rank_tracks_live_score() {
        let mut app = app();
        assert_eq!(app.projected_rank(), None);

        for score in [40, 20] {
            let summary = SessionSummary {
                difficulty: Difficulty::Normal,
                score,
                perfect_passes: 0,
                near_misses: 0,
                max_combo: 0,
                coins_earned: 0,
                cause: None,
            };
            app.high_scores.add_session(&summary, 0.0);
        }
        assert_eq!(app.high_scores.top_score(), Some(40));

        app.apply(Command::StartGame).unwrap();
        assert_eq!(app.projected_rank(), None);
        if let Some(session) = app.session.as_mut() {
            session.score = 25;
        }
        assert_eq!(app.projected_rank(), Some(2));
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut app = app();
        app.jump();
        assert!(app.update().is_empty());

        app.apply(Command::StartGame).unwrap();
        app.jump();
        let events = app.update();
        assert_eq!(events.first(), Some(&GameEvent::Jumped));
        assert!(app.update().iter().all(|e| *e != GameEvent::Jumped));
    }

    #[test]
    fn test_falling_out_reaches_game_over_and_flushes() {
        let mut app = app();
        app.apply(Command::StartGame).unwrap();

        let mut ticks = 0;
        while app.screen() == Screen::Playing && ticks < 1000 {
            app.update();
            ticks += 1;
        }
        assert_eq!(app.screen(), Screen::GameOver);

        let report = app.last_report().unwrap();
        assert!(report.summary.cause.is_some());
        assert_eq!(app.settings.total_score, u64::from(report.summary.score));

        // Physics keeps running on the game-over screen
        let y = app.session().unwrap().player.y;
        app.update();
        assert!(app.session().unwrap().player.y > y);

        app.apply(Command::Back).unwrap();
        assert!(app.session().is_none());
    }

    #[test]
    fn test_shop_passthrough() {
        let mut app = app();
        app.settings.coins = 100;
        app.purchase(ItemKind::Bird, "golden").unwrap();
        app.equip(ItemKind::Bird, "golden").unwrap();
        assert_eq!(app.settings.current_bird, "golden");
        assert!(matches!(
            app.purchase(ItemKind::Bird, "rainbow"),
            Err(AppError::Shop(_))
        ));
    }

    #[test]
    fn test_credits() {
        assert_eq!(CREDITS.len(), 2);
        assert!(CREDITS.iter().all(|c| !c.name.is_empty()));
    }
}
