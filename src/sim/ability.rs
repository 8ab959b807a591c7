//! Player abilities: the area pulse and the dash
//!
//! The pulse cooldown runs on wall-clock milliseconds so it feels the same at
//! any frame rate. The dash runs on ticks.

use super::collision::within_radius;
use super::state::{GameEvent, GameState, Player};

/// Whether the pulse may fire at `now_ms`
pub fn pulse_ready(state: &GameState, now_ms: f64) -> bool {
    state
        .last_pulse_ms
        .is_none_or(|last| now_ms - last >= state.difficulty.pulse_cooldown_ms)
}

/// Fire the pulse: clear every glitch within range of the player and purify a
/// corrupted goal in the same range. No-op during cooldown.
pub fn trigger_pulse(state: &mut GameState, now_ms: f64) -> bool {
    if !pulse_ready(state, now_ms) {
        return false;
    }
    state.last_pulse_ms = Some(now_ms);

    let center = state.player.center();
    let radius = state.config.pulse_radius;
    log::debug!("Pulse at ({:.1}, {:.1})", center.x, center.y);
    state.events.push(GameEvent::PulseFired { center });

    let mut removed = 0;
    let events = &mut state.events;
    state.glitches.retain(|glitch| {
        if within_radius(center, glitch.center(), radius) {
            events.push(GameEvent::GlitchDestroyed {
                pos: glitch.pos,
                color: glitch.color,
            });
            removed += 1;
            false
        } else {
            true
        }
    });

    if state.goal.is_corrupted && within_radius(center, state.goal.center(), radius) {
        state.goal.is_corrupted = false;
        log::info!("Goal purified ({} glitches cleared)", removed);
        state.events.push(GameEvent::GoalPurified { pos: state.goal.pos });
    }

    true
}

/// Start a dash if none is active and the cooldown has run out
pub fn try_dash(state: &mut GameState) -> bool {
    let player = &mut state.player;
    if player.dash.is_dashing || player.dash.cooldown > 0 {
        return false;
    }
    player.dash.is_dashing = true;
    player.dash.timer = state.config.dash_frames;
    player.dash.cooldown = state.config.dash_cooldown_frames;
    player.speed = player.base_speed * state.config.dash_multiplier;
    log::debug!("Dash");
    state.events.push(GameEvent::DashStarted);
    true
}

/// Count down dash timers by one tick
pub fn update_dash(player: &mut Player) {
    if player.dash.is_dashing {
        player.dash.timer = player.dash.timer.saturating_sub(1);
        if player.dash.timer == 0 {
            player.dash.is_dashing = false;
            player.speed = player.base_speed;
        }
    }
    player.dash.cooldown = player.dash.cooldown.saturating_sub(1);
}
