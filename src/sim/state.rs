//! Game state and core simulation types
//!
//! Everything the simulation mutates is owned by [`GameState`] and passed
//! explicitly to each component.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::difficulty::Difficulty;
use super::fx::Effects;
use super::motion;
use super::spawner;
use crate::config::{EffectSettings, GameConfig};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Session ended, waiting for confirm
    GameOver,
}

/// Dash bookkeeping (all counters in ticks)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DashState {
    pub is_dashing: bool,
    /// Ticks of dash remaining
    pub timer: u32,
    /// Ticks until another dash is allowed
    pub cooldown: u32,
}

/// The player's point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Movement applied on the last tick
    pub vel: Vec2,
    pub size: f32,
    pub base_speed: f32,
    /// Current speed (boosted while dashing)
    pub speed: f32,
    pub color: u32,
    pub dash: DashState,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: config.player_size,
            base_speed: config.player_speed,
            speed: config.player_speed,
            color: PLAYER_COLOR,
            dash: DashState::default(),
        };
        player.recenter(config);
        player
    }

    /// Put the player back in the middle of the field, at rest
    pub fn recenter(&mut self, config: &GameConfig) {
        self.pos = config.center();
        self.vel = Vec2::ZERO;
        self.speed = self.base_speed;
        self.dash = DashState::default();
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_square(self.pos, self.size)
    }

    /// Whether the player moved on the last tick
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// A hostile bouncing entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glitch {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Display color (cosmetic only)
    pub color: u32,
}

impl Glitch {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_square(self.pos, self.size)
    }

    /// Move one tick and bounce off the field edges
    pub fn advance(&mut self, field: Vec2) {
        motion::step(&mut self.pos, &mut self.vel, self.size, field);
    }
}

/// A temporary display color with an expiry timestamp
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ColorFlash {
    pub color: u32,
    /// Wall-clock time (ms) at which the flash ends
    pub until_ms: f64,
}

/// The single collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Corrupted goals are lethal; pure goals score
    pub is_corrupted: bool,
    pub color: u32,
    #[serde(default)]
    pub flash: Option<ColorFlash>,
}

impl Goal {
    pub fn new(size: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size,
            is_corrupted: true,
            color: GOAL_COLOR,
            flash: None,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_square(self.pos, self.size)
    }

    /// Move one tick and bounce off the field edges
    pub fn advance(&mut self, field: Vec2) {
        motion::step(&mut self.pos, &mut self.vel, self.size, field);
    }

    /// Show `color` until `now_ms + duration_ms`
    pub fn flash(&mut self, color: u32, now_ms: f64, duration_ms: f64) {
        self.flash = Some(ColorFlash {
            color,
            until_ms: now_ms + duration_ms,
        });
    }

    /// Drop an expired flash (checked every tick)
    pub fn expire_flash(&mut self, now_ms: f64) {
        if self.flash.is_some_and(|f| now_ms >= f.until_ms) {
            self.flash = None;
        }
    }

    /// Color a renderer should use at `now_ms`
    pub fn display_color(&self, now_ms: f64) -> u32 {
        match self.flash {
            Some(flash) if now_ms < flash.until_ms => flash.color,
            _ => self.color,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Touched a glitch while moving and not dashing
    Glitch,
    /// Touched the goal while it was still corrupted
    CorruptedGoal,
    /// Glitch population exceeded the hard ceiling
    Overflow,
}

/// Discrete things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Full reset performed, gameplay begins
    SessionStarted,
    PhaseChanged { from: GamePhase, to: GamePhase },
    PulseFired { center: Vec2 },
    GlitchDestroyed { pos: Vec2, color: u32 },
    GoalPurified { pos: Vec2 },
    GoalCaptured { score: u64 },
    Escalated { level: u32, glitch_target: usize, pulse_cooldown_ms: f64 },
    DashStarted,
    PlayerDied { cause: DeathCause },
    /// High score beaten; the host persists it
    NewHighScore { score: u64 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Score of the current session
    pub score: u64,
    /// Best score across sessions
    pub high_score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Hostiles (unordered)
    pub glitches: Vec<Glitch>,
    pub goal: Goal,
    pub difficulty: Difficulty,
    /// Timestamp of the last successful pulse (ms)
    pub last_pulse_ms: Option<f64>,
    /// Visual state (not gameplay-affecting)
    pub fx: Effects,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Gameplay randomness
    pub(crate) rng: Pcg32,
    /// Cosmetic randomness, never used for gameplay
    pub(crate) fx_rng: Pcg32,
    next_id: u32,
}

/// Stream id for the cosmetic RNG
const FX_STREAM: u64 = 0x0a02_bdbf_7bb3_c0a7;

impl GameState {
    /// Create a new game sitting on the title screen
    pub fn new(seed: u64, config: GameConfig, high_score: u64) -> Self {
        let difficulty = Difficulty::new(&config);
        let mut state = Self {
            seed,
            phase: GamePhase::Start,
            score: 0,
            high_score,
            time_ticks: 0,
            player: Player::new(&config),
            glitches: Vec::new(),
            goal: Goal::new(config.goal_size),
            difficulty,
            last_pulse_ms: None,
            fx: Effects::new(EffectSettings::default()),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::new(seed, FX_STREAM),
            next_id: 1,
            config,
        };

        // Backdrop for the title screen
        state.spawn_glitches(state.config.baseline_glitches);
        state.relocate_goal();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add `amount` glitches away from the player
    pub fn spawn_glitches(&mut self, amount: usize) {
        let field = self.config.field();
        let size = self.config.glitch_size;
        for _ in 0..amount {
            let pos = spawner::safe_position(
                &mut self.rng,
                field,
                size,
                self.player.center(),
                self.config.glitch_safe_distance,
                self.config.spawn_attempts,
            );
            let vel = spawner::random_velocity(&mut self.rng, self.config.field_speed);
            let color = spawner::pick_color(&mut self.fx_rng);
            let id = self.next_entity_id();
            self.glitches.push(Glitch {
                id,
                pos,
                vel,
                size,
                color,
            });
        }
    }

    /// Move the goal far from the player, reseed its velocity and corrupt it
    pub fn relocate_goal(&mut self) {
        self.goal.pos = spawner::safe_position(
            &mut self.rng,
            self.config.field(),
            self.goal.size,
            self.player.center(),
            self.config.goal_safe_distance,
            self.config.spawn_attempts,
        );
        self.goal.vel = spawner::random_velocity(&mut self.rng, self.config.field_speed);
        self.goal.is_corrupted = true;
    }

    /// Record a transition and switch phase
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        if self.phase != to {
            let from = self.phase;
            log::info!("Phase {:?} -> {:?}", from, to);
            self.phase = to;
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for a presentation layer
    pub fn snapshot(&self, now_ms: f64) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            field: self.config.field(),
            player: &self.player,
            glitches: &self.glitches,
            goal: &self.goal,
            goal_color: self.goal.display_color(now_ms),
            pulse_ready: super::ability::pulse_ready(self, now_ms),
            fx: &self.fx,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub field: Vec2,
    pub player: &'a Player,
    pub glitches: &'a [Glitch],
    pub goal: &'a Goal,
    pub goal_color: u32,
    pub pulse_ready: bool,
    pub fx: &'a Effects,
}
