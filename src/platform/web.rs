//! Browser facade
//!
//! JavaScript owns the canvas, the frame clock and DOM input events; it
//! forwards thrust changes and frame times here and draws from the snapshot.

use wasm_bindgen::prelude::*;

use super::input::is_thrust_key;
use crate::game::Game;
use crate::persistence::LocalStorageStore;
use crate::sim::GamePhase;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Open Cave (web) starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game from an optional JSON tuning override
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => {
                Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => Tuning::default(),
        };
        Ok(Self {
            game: Game::with_session_entropy(
                tuning,
                LocalStorageStore::new(),
                js_sys::Date::now() as u64,
            ),
        })
    }

    pub fn set_thrust(&mut self, active: bool) {
        self.game.set_thrust(active);
    }

    /// Route a `KeyboardEvent.code`; returns true if the key was consumed
    pub fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        if is_thrust_key(code) {
            self.game.set_thrust(pressed);
            true
        } else {
            false
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.game.set_idle_mode(idle);
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.game.update(dt);
    }

    pub fn score(&self) -> u64 {
        self.game.score()
    }

    pub fn best_score(&self) -> u64 {
        self.game.best_score()
    }

    /// "menu", "playing" or "gameover"
    pub fn phase(&self) -> String {
        match self.game.phase() {
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    /// Full drawable state as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
