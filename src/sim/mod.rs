//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (gameplay and cosmetic streams kept apart)
//! - Wall-clock time only enters through explicit `now_ms` arguments
//! - No rendering, audio or storage dependencies

pub mod ability;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod fx;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Aabb, overlaps, within_radius};
pub use fx::Effects;
pub use state::{
    DashState, DeathCause, GameEvent, GamePhase, GameState, Glitch, Goal, Player, Snapshot,
};
pub use tick::{TickInput, tick};
