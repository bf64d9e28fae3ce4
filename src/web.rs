//! Browser entry point
//!
//! JavaScript owns the canvas and the animation frame. It forwards key
//! presses and releases, calls `tick` once per frame and draws the returned
//! draw list.

use wasm_bindgen::prelude::*;

use crate::game::GameStateMachine;
use crate::highscores::MemoryScoreStore;
use crate::persistence::LocalScoreStore;
use crate::platform::input::KeyState;
use crate::platform::storage::LocalStorage;
use crate::service::{InlineScoreService, ScoreService};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Asteroids (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    machine: GameStateMachine<Box<dyn ScoreService>>,
    keys: KeyState,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load_from(&LocalStorage);
        let service: Box<dyn ScoreService> = match LocalScoreStore::open(LocalStorage) {
            Ok(store) => Box::new(InlineScoreService::new(store, settings.top_scores)),
            Err(e) => {
                log::warn!("LocalStorage unavailable ({e}), scores will not be kept");
                Box::new(InlineScoreService::new(MemoryScoreStore::new(), settings.top_scores))
            }
        };
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        WebGame {
            machine: GameStateMachine::new(service, settings.tuning, settings.top_scores, seed),
            keys: KeyState::new(),
            last_time: None,
        }
    }

    /// Forward a `KeyboardEvent.key`
    pub fn key_down(&mut self, key: &str) {
        self.keys.press_dom(key);
    }

    /// Forward a `keyup` `KeyboardEvent.key`
    pub fn key_up(&mut self, key: &str) {
        self.keys.release_dom(key);
    }

    /// Window lost focus; no key-up will arrive for held keys
    pub fn blur(&mut self) {
        self.keys.release_all();
    }

    /// Advance one animation frame; `time` is the rAF timestamp in ms.
    /// Returns false once the player quits.
    pub fn tick(&mut self, time: f64) -> bool {
        let dt = self
            .last_time
            .map(|last| ((time - last) / 1000.0) as f32)
            .unwrap_or(0.0)
            .max(0.0);
        self.last_time = Some(time);
        let events = self.keys.frame_events();
        self.machine.tick(&events, dt)
    }

    /// Current frame as JSON for the JavaScript renderer
    pub fn frame_json(&self) -> String {
        serde_json::to_string(&self.machine.draw()).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
