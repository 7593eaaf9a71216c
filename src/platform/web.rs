//! Browser surface
//!
//! The page owns the canvas and calls `WebGame::frame` once per
//! `requestAnimationFrame`. Everything crossing the boundary is a plain
//! number, string or JSON document.

use wasm_bindgen::prelude::*;

use crate::app::{App, Command, Screen};
use crate::persistence::LocalStorage;
use crate::shop::ItemKind;
use crate::tuning::Difficulty;

/// LocalStorage key prefix
const STORAGE_PREFIX: &str = "flappy_drift";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Flappy Drift (web) starting...");
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_kind(kind: &str) -> Result<ItemKind, JsValue> {
    match kind {
        "bird" => Ok(ItemKind::Bird),
        "obstacle" => Ok(ItemKind::Obstacle),
        other => Err(to_js(format!("unknown item kind {other:?}"))),
    }
}

#[wasm_bindgen]
pub struct WebGame {
    app: App,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            app: App::new(Box::new(LocalStorage::new(STORAGE_PREFIX)), seed),
        }
    }

    /// Current screen name (`"Menu"`, `"Playing"`, ...)
    pub fn screen(&self) -> String {
        self.app.screen().to_string()
    }

    pub fn start_game(&mut self) -> Result<(), JsValue> {
        self.app.apply(Command::StartGame).map(drop).map_err(to_js)
    }

    pub fn open_settings(&mut self) -> Result<(), JsValue> {
        self.app.apply(Command::OpenSettings).map(drop).map_err(to_js)
    }

    pub fn open_shop(&mut self) -> Result<(), JsValue> {
        self.app.apply(Command::OpenShop).map(drop).map_err(to_js)
    }

    pub fn open_credits(&mut self) -> Result<(), JsValue> {
        self.app.apply(Command::OpenCredits).map(drop).map_err(to_js)
    }

    pub fn back(&mut self) -> Result<(), JsValue> {
        self.app.apply(Command::Back).map(drop).map_err(to_js)
    }

    /// Space / click / tap
    pub fn jump(&mut self) {
        self.app.jump();
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.app.autopilot = on;
    }

    /// One animation frame; returns the tick's events as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        let events = self.app.update();
        serde_json::to_string(&events).map_err(to_js)
    }

    /// HUD snapshot as JSON, or `null` outside a session
    pub fn hud(&self) -> Result<String, JsValue> {
        let hud = self.app.session().map(|s| s.hud());
        serde_json::to_string(&hud).map_err(to_js)
    }

    pub fn screen_shake(&self) -> u32 {
        match self.app.session() {
            Some(s) if self.app.settings.screen_shake => s.screen_shake,
            _ => 0,
        }
    }

    /// Game-over flush result as JSON (`null` before the first game over)
    pub fn game_over_report(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.last_report()).map_err(to_js)
    }

    pub fn settings(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.settings).map_err(to_js)
    }

    /// Rank the current score would take on the leaderboard
    pub fn projected_rank(&self) -> Option<u32> {
        self.app.projected_rank().map(|r| r as u32)
    }

    /// Best score on the leaderboard
    pub fn top_score(&self) -> Option<u32> {
        self.app.high_scores.top_score()
    }

    pub fn high_scores(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.app.high_scores.entries).map_err(to_js)
    }

    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsValue> {
        if self.app.screen() != Screen::Settings {
            return Err(to_js("difficulty can only change on the settings screen"));
        }
        self.app.settings.difficulty = name.parse::<Difficulty>().map_err(to_js)?;
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.app.settings.set_volume(volume);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.app.settings.set_music_volume(volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.app.settings.set_sfx_volume(volume);
    }

    pub fn toggle_screen_shake(&mut self) {
        self.app.settings.screen_shake = !self.app.settings.screen_shake;
    }

    pub fn toggle_particles(&mut self) {
        self.app.settings.particle_effects = !self.app.settings.particle_effects;
    }

    pub fn toggle_show_fps(&mut self) {
        self.app.settings.show_fps = !self.app.settings.show_fps;
    }

    pub fn cycle_background(&mut self) {
        self.app.settings.background_style = self.app.settings.background_style.next();
    }

    pub fn cycle_theme(&mut self) {
        self.app.settings.color_theme = self.app.settings.color_theme.next();
    }

    /// `kind` is `"bird"` or `"obstacle"`
    pub fn purchase(&mut self, kind: &str, id: &str) -> Result<(), JsValue> {
        self.app.purchase(parse_kind(kind)?, id).map_err(to_js)
    }

    pub fn equip(&mut self, kind: &str, id: &str) -> Result<(), JsValue> {
        self.app.equip(parse_kind(kind)?, id).map_err(to_js)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
