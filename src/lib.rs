//! The Corrupted Buffer - a single-screen arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, abilities, game state)
//! - `config`: Data-driven game balance and effect preferences
//! - `highscores`: Single persisted high score value
//! - `audio`: Fire-and-forget sound effects
//! - `session`: Host glue driving the simulation from display callbacks
//! - `autopilot`: Attract-mode bot producing input snapshots

pub mod audio;
pub mod autopilot;
pub mod config;
pub mod highscores;
pub mod session;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{EffectSettings, GameConfig};
pub use highscores::HighScoreStore;
pub use session::Session;

/// Game configuration constants
pub mod consts {
    /// Logical simulation rate (updates per second)
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_STEP_MS: f64 = 1000.0 / SIM_HZ;

    /// Glitch display palette (red, green, blue)
    pub const GLITCH_PALETTE: [u32; 3] = [0xff0000, 0x00ff00, 0x0000ff];
    /// Hacker green
    pub const PLAYER_COLOR: u32 = 0x00ff00;
    /// Cyan, shown while the goal is pure
    pub const GOAL_COLOR: u32 = 0x00ffff;
    /// Goal flash color after the player dies
    pub const GOAL_FLASH_COLOR: u32 = 0xff0000;
    /// How long the goal flash lasts (ms)
    pub const GOAL_FLASH_MS: f64 = 100.0;

    /// Pulse ring expansion per tick
    pub const PULSE_RING_SPEED: f32 = 2.0;
    /// Maximum ghost trail points behind the player
    pub const TRAIL_LENGTH: usize = 12;
    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 512;
}
