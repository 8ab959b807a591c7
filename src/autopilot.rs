//! Idle/demo mode - a bot that plays the game
//!
//! Produces the same boolean snapshot a keyboard would. Used for the attract
//! screen and for headless soak runs.

use glam::Vec2;

use crate::sim::{GamePhase, GameState, TickInput, ability};

/// Glitches closer than this are fled from
const DANGER_RADIUS: f32 = 40.0;
/// Dash when a glitch is this close
const PANIC_RADIUS: f32 = 20.0;
/// Ignore axis components smaller than this when steering
const DEADZONE: f32 = 0.3;

/// Choose this tick's input for the current state
pub fn drive(state: &GameState, now_ms: f64) -> TickInput {
    if state.phase != GamePhase::Playing {
        return TickInput {
            confirm: true,
            ..Default::default()
        };
    }

    let me = state.player.center();
    let mut input = TickInput::default();

    // Find the most dangerous glitch (closest to the player)
    let nearest = state
        .glitches
        .iter()
        .map(|g| (g.center(), g.center().distance(me)))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let goal = state.goal.center();
    let goal_dist = goal.distance(me);
    let pulse_range = state.config.pulse_radius * 0.9;

    let heading = match nearest {
        Some((pos, dist)) if dist < DANGER_RADIUS => {
            if dist < PANIC_RADIUS {
                input.dash = true;
            }
            if ability::pulse_ready(state, now_ms) {
                input.pulse = true;
            }
            me - pos
        }
        _ if state.goal.is_corrupted => {
            if goal_dist < pulse_range && ability::pulse_ready(state, now_ms) {
                input.pulse = true;
            }
            // Close in, but keep off the corrupted goal itself
            if goal_dist > pulse_range * 0.5 {
                goal - me
            } else {
                me - goal
            }
        }
        _ => goal - me,
    };

    steer(&mut input, heading);
    input
}

fn steer(input: &mut TickInput, heading: Vec2) {
    let dir = heading.normalize_or_zero();
    input.move_left = dir.x < -DEADZONE;
    input.move_right = dir.x > DEADZONE;
    input.move_up = dir.y < -DEADZONE;
    input.move_down = dir.y > DEADZONE;
}
