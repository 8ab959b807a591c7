//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one logical frame. Order within
//! a playing tick: input -> motion -> collisions and goal -> pulse ->
//! difficulty checks -> visual timers.

use glam::Vec2;

use super::ability;
use super::difficulty;
use super::motion;
use super::state::{DeathCause, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Boolean action snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Start a dash (one-shot)
    pub dash: bool,
    /// Fire the pulse (one-shot)
    pub pulse: bool,
    /// Menu confirm (one-shot)
    pub confirm: bool,
}

impl TickInput {
    /// Unit-per-axis movement direction (diagonals are not normalized)
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.move_up {
            dir.y -= 1.0;
        }
        if self.move_down {
            dir.y += 1.0;
        }
        if self.move_left {
            dir.x -= 1.0;
        }
        if self.move_right {
            dir.x += 1.0;
        }
        dir
    }

    /// Held keys to tick input: directions pass through, one-shot actions only
    /// fire on the snapshot where their key goes down
    pub fn pressed_since(&self, previous: &TickInput) -> TickInput {
        TickInput {
            dash: self.dash && !previous.dash,
            pulse: self.pulse && !previous.pulse,
            confirm: self.confirm && !previous.confirm,
            ..*self
        }
    }
}

/// Advance the game by one tick. `now_ms` is wall-clock time, used only for the
/// pulse cooldown and timed color flashes.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    let events_before = state.events.len();

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.confirm {
                reset_session(state);
            }
        }
        GamePhase::Playing => {
            state.time_ticks += 1;
            play(state, input, now_ms);
        }
    }

    state.goal.expire_flash(now_ms);

    // Visuals keep animating on every screen
    let new_events = state.events[events_before..].to_vec();
    state.fx.absorb(&new_events, &mut state.fx_rng);
    state.fx.update(state.config.pulse_radius);
}

fn play(state: &mut GameState, input: &TickInput, now_ms: f64) {
    // --- INPUT ---
    ability::update_dash(&mut state.player);
    if input.dash {
        ability::try_dash(state);
    }

    let field = state.config.field();
    let player = &mut state.player;
    player.vel = input.direction() * player.speed;
    let old_pos = player.pos;
    player.pos = motion::clamp_to_field(player.pos + player.vel, player.size, field);
    if player.pos != old_pos {
        state.fx.record_trail(old_pos);
    }

    // --- MOTION ---
    for glitch in &mut state.glitches {
        glitch.advance(field);
    }
    state.goal.advance(field);

    // --- COLLISIONS ---
    if hostile_contact(state) {
        end_session(state, DeathCause::Glitch, now_ms);
        return;
    }

    if state.player.aabb().overlaps(&state.goal.aabb()) {
        if state.goal.is_corrupted {
            log::info!("Tried to access corrupted memory");
            end_session(state, DeathCause::CorruptedGoal, now_ms);
            return;
        }
        difficulty::capture_goal(state);
    }

    // --- ABILITY ---
    if input.pulse {
        ability::trigger_pulse(state, now_ms);
    }

    // --- DIFFICULTY ---
    if difficulty::overflowed(state) {
        log::warn!("Glitch population {} over the ceiling", state.glitches.len());
        end_session(state, DeathCause::Overflow, now_ms);
    }
}

/// Lethal glitch contact this tick (dash grants immunity; optionally only a
/// moving player can be hit)
fn hostile_contact(state: &GameState) -> bool {
    let player = &state.player;
    if player.dash.is_dashing {
        return false;
    }
    if state.config.collision_requires_motion && !player.is_moving() {
        return false;
    }
    let aabb = player.aabb();
    state.glitches.iter().any(|g| aabb.overlaps(&g.aabb()))
}

/// Full session reset, straight into gameplay
pub fn reset_session(state: &mut GameState) {
    state.score = 0;
    state.time_ticks = 0;
    state.difficulty = difficulty::Difficulty::new(&state.config);
    state.last_pulse_ms = None;
    state.player.recenter(&state.config);
    state.fx.clear();

    state.glitches.clear();
    state.spawn_glitches(state.config.baseline_glitches);
    state.relocate_goal();
    state.goal.flash = None;

    log::info!("Session started (seed {})", state.seed);
    state.events.push(GameEvent::SessionStarted);
    state.set_phase(GamePhase::Playing);
}

/// Stop the session and record a new high score if one was set
pub fn end_session(state: &mut GameState, cause: DeathCause, now_ms: f64) {
    log::info!("System failure ({:?}), score {}", cause, state.score);
    state.events.push(GameEvent::PlayerDied { cause });

    if cause == DeathCause::Glitch {
        state.goal.flash(GOAL_FLASH_COLOR, now_ms, GOAL_FLASH_MS);
    }
    state.glitches.clear();

    if state.score > state.high_score {
        state.high_score = state.score;
        log::info!("New high score: {}", state.high_score);
        state.events.push(GameEvent::NewHighScore {
            score: state.high_score,
        });
    }

    state.set_phase(GamePhase::GameOver);
}
