//! Browser bindings
//!
//! The page owns the canvas and keyboard listeners; it calls [`WebGame::frame`]
//! from `requestAnimationFrame` with the held keys and draws from
//! [`WebGame::snapshot`].

use wasm_bindgen::prelude::*;

use crate::audio::WebAudio;
use crate::autopilot;
use crate::config::{EffectSettings, GameConfig};
use crate::highscores::LocalStorageStore;
use crate::session::Session;
use crate::sim::{GamePhase, TickInput};

/// Key bits understood by [`WebGame::set_keys`]
pub mod keys {
    pub const UP: u32 = 1 << 0;
    pub const DOWN: u32 = 1 << 1;
    pub const LEFT: u32 = 1 << 2;
    pub const RIGHT: u32 = 1 << 3;
    pub const DASH: u32 = 1 << 4;
    pub const PULSE: u32 = 1 << 5;
    pub const CONFIRM: u32 = 1 << 6;
}

fn input_from_bits(bits: u32) -> TickInput {
    TickInput {
        move_up: bits & keys::UP != 0,
        move_down: bits & keys::DOWN != 0,
        move_left: bits & keys::LEFT != 0,
        move_right: bits & keys::RIGHT != 0,
        dash: bits & keys::DASH != 0,
        pulse: bits & keys::PULSE != 0,
        confirm: bits & keys::CONFIRM != 0,
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("The Corrupted Buffer starting...");
}

/// Game instance exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore, WebAudio>,
    settings: EffectSettings,
    /// Attract mode: the bot plays
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        let settings = EffectSettings::load();
        let mut audio = WebAudio::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        WebGame {
            session: Session::new(seed, GameConfig::default(), LocalStorageStore, audio)
                .with_effects(settings.clone()),
            settings,
            idle_mode: false,
        }
    }

    /// Held keys for the coming frames (bitmask of [`keys`])
    pub fn set_keys(&mut self, bits: u32) {
        if bits != 0 {
            self.idle_mode = false;
        }
        self.session.set_held_input(input_from_bits(bits));
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.settings.master_volume = volume.clamp(0.0, 1.0);
        self.session.audio_mut().set_master_volume(volume);
        self.settings.save();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.session.audio_mut().set_muted(muted);
        self.settings.save();
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.settings.reduced_motion = reduced;
        self.session.state.fx.settings = self.settings.clone();
        self.settings.save();
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Display callback; returns true if the simulation advanced
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.idle_mode {
            let input = autopilot::drive(&self.session.state, now_ms);
            self.session.set_input(input);
        }
        self.session.frame(now_ms)
    }

    /// JSON render snapshot
    pub fn snapshot(&self, now_ms: f64) -> String {
        serde_json::to_string(&self.session.state.snapshot(now_ms)).unwrap_or_default()
    }

    pub fn phase(&self) -> String {
        match self.session.state.phase {
            GamePhase::Start => "start",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.session.state.score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.session.state.high_score as f64
    }

    pub fn fps(&self) -> u32 {
        self.session.fps()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
