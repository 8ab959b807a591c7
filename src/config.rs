//! Game balance and effect preferences
//!
//! Every gameplay constant lives in [`GameConfig`] so tests and hosts can
//! tune difficulty without touching the simulation. Cosmetic toggles live in
//! [`EffectSettings`] and never influence gameplay outcomes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    /// Field width in world units
    pub field_width: f32,
    /// Field height in world units
    pub field_height: f32,
    /// Velocity components are drawn from [-field_speed, field_speed)
    pub field_speed: f32,

    // === Player ===
    pub player_size: f32,
    /// Units per tick while not dashing
    pub player_speed: f32,
    /// Speed multiplier while dashing
    pub dash_multiplier: f32,
    /// Dash duration (ticks)
    pub dash_frames: u32,
    /// Ticks before another dash may start
    pub dash_cooldown_frames: u32,
    /// Hostile contact only kills a moving player
    pub collision_requires_motion: bool,

    // === Entities ===
    pub glitch_size: f32,
    pub goal_size: f32,
    /// Glitches spawned by a full session reset
    pub baseline_glitches: usize,
    /// Population above which the session ends
    pub max_glitches: usize,
    /// Minimum distance between a new glitch and the player
    pub glitch_safe_distance: f32,
    /// Minimum distance between a relocated goal and the player
    pub goal_safe_distance: f32,
    /// Rejection sampling attempts before accepting any point
    pub spawn_attempts: u32,

    // === Pulse ===
    pub pulse_radius: f32,
    /// Initial pulse cooldown (ms)
    pub pulse_cooldown_ms: f64,
    /// Cooldown reduction per escalation (ms)
    pub pulse_cooldown_step_ms: f64,
    /// Cooldown never shrinks below this (ms)
    pub pulse_cooldown_floor_ms: f64,

    // === Scoring ===
    /// Points for recovering a pure goal
    pub capture_reward: u64,
    /// Glitches added on every capture
    pub capture_spawn: usize,
    /// First escalation threshold; later ones double it
    pub escalation_base: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 640.0,
            field_height: 480.0,
            field_speed: 1.0,

            player_size: 4.0,
            player_speed: 2.0,
            dash_multiplier: 3.0,
            dash_frames: 12,
            dash_cooldown_frames: 90,
            collision_requires_motion: true,

            glitch_size: 12.0,
            goal_size: 12.0,
            baseline_glitches: 10,
            max_glitches: 1000,
            glitch_safe_distance: 80.0,
            goal_safe_distance: 160.0,
            spawn_attempts: 100,

            pulse_radius: 100.0,
            pulse_cooldown_ms: 300.0,
            pulse_cooldown_step_ms: 25.0,
            pulse_cooldown_floor_ms: 100.0,

            capture_reward: 64,
            capture_spawn: 1,
            escalation_base: 64,
        }
    }
}

impl GameConfig {
    /// Field bounds as a vector (width, height)
    #[inline]
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Field center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.field() * 0.5
    }

    /// Clamp values that would make the simulation degenerate
    pub fn sanitized(mut self) -> Self {
        let largest = self.player_size.max(self.glitch_size).max(self.goal_size);
        self.field_width = self.field_width.max(largest * 2.0);
        self.field_height = self.field_height.max(largest * 2.0);
        self.field_speed = self.field_speed.abs();
        self.spawn_attempts = self.spawn_attempts.max(1);
        self.escalation_base = self.escalation_base.max(1);
        self.pulse_cooldown_floor_ms = self.pulse_cooldown_floor_ms.max(0.0);
        self.pulse_cooldown_ms = self.pulse_cooldown_ms.max(self.pulse_cooldown_floor_ms);
        self.max_glitches = self.max_glitches.max(self.baseline_glitches);
        self
    }

    /// Parse a JSON config, falling back to defaults for anything invalid
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<GameConfig>(json) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                log::warn!("Invalid game config ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Load config from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded game config from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}

/// Cosmetic preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Screen shake on death
    pub screen_shake: bool,
    /// Particle bursts
    pub particles: bool,
    /// Player ghost trail
    pub trails: bool,
    /// Reduced motion (minimize shake, flashes)
    pub reduced_motion: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            particles: true,
            trails: true,
            reduced_motion: false,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl EffectSettings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective pulse flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        !self.reduced_motion
    }

    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<EffectSettings>(json) {
            Ok(mut settings) => {
                settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                settings
            }
            Err(e) => {
                log::warn!("Invalid effect settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "corrupted_buffer_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = Self::storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded effect settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::warn!("Could not read {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_field() {
        let config = GameConfig::default();
        assert_eq!(config.field(), Vec2::new(640.0, 480.0));
        assert_eq!(config.center(), Vec2::new(320.0, 240.0));
        assert_eq!(config.capture_reward, 64);
        assert!(config.glitch_safe_distance < config.goal_safe_distance);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "pulse_radius": 150.0, "baseline_glitches": 4 }"#);
        assert_eq!(config.pulse_radius, 150.0);
        assert_eq!(config.baseline_glitches, 4);
        assert_eq!(config.field_width, 640.0);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let config = GameConfig::from_json("not json");
        assert_eq!(config.baseline_glitches, GameConfig::default().baseline_glitches);
    }

    #[test]
    fn test_sanitized_repairs_degenerate_values() {
        let config = GameConfig {
            field_width: 1.0,
            spawn_attempts: 0,
            pulse_cooldown_ms: 10.0,
            pulse_cooldown_floor_ms: 50.0,
            max_glitches: 2,
            ..Default::default()
        }
        .sanitized();
        assert!(config.field_width >= 24.0);
        assert_eq!(config.spawn_attempts, 1);
        assert_eq!(config.pulse_cooldown_ms, 50.0);
        assert_eq!(config.max_glitches, config.baseline_glitches);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = EffectSettings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
        assert!(!settings.effective_flash());
    }

    #[test]
    fn test_effect_settings_from_json() {
        let settings = EffectSettings::from_json(r#"{ "particles": false, "master_volume": 3.0 }"#);
        assert!(!settings.particles);
        assert!(settings.trails);
        assert_eq!(settings.master_volume, 1.0);

        let fallback = EffectSettings::from_json("{");
        assert!(fallback.particles);
        assert!(!fallback.muted);
    }

    #[test]
    fn test_effect_settings_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "corrupted_buffer_effects_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "reduced_motion": true, "trails": false }"#).unwrap();
        let settings = EffectSettings::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(settings.reduced_motion);
        assert!(!settings.trails);

        let missing = EffectSettings::load(std::path::Path::new("/nonexistent/effects.json"));
        assert!(missing.trails);
    }
}
