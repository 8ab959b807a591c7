//! Score and difficulty scaling
//!
//! Escalation thresholds sit at `escalation_base * 2^k` (64, 128, 256, ...).
//! Crossing one doubles the target glitch population, spawns the difference and
//! shortens the pulse cooldown down to a floor. A single capture that jumps
//! several thresholds escalates once per threshold.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::config::GameConfig;

/// Difficulty ratchet for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    /// Escalations so far
    pub level: u32,
    /// Population the escalations aim for
    pub glitch_target: usize,
    /// Current pulse cooldown (ms)
    pub pulse_cooldown_ms: f64,
    /// Score at which the next escalation fires
    pub next_threshold: u64,
}

impl Difficulty {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: 0,
            glitch_target: config.baseline_glitches,
            pulse_cooldown_ms: config.pulse_cooldown_ms,
            next_threshold: config.escalation_base.max(1),
        }
    }

    /// Advance past one threshold if `score` reached it. Returns the number of
    /// glitches to spawn.
    pub fn escalate(&mut self, score: u64, config: &GameConfig) -> Option<usize> {
        if score < self.next_threshold {
            return None;
        }
        self.level += 1;
        self.next_threshold = self.next_threshold.saturating_mul(2);

        let old_target = self.glitch_target;
        self.glitch_target = old_target.saturating_mul(2).max(1);
        self.pulse_cooldown_ms = (self.pulse_cooldown_ms - config.pulse_cooldown_step_ms)
            .max(config.pulse_cooldown_floor_ms);

        Some(self.glitch_target - old_target)
    }
}

/// Score a pure goal: reward, relocate, corrupt again, ratchet pressure
pub fn capture_goal(state: &mut GameState) {
    state.score += state.config.capture_reward;
    log::info!("Data recovered! Score: {}", state.score);
    state.events.push(GameEvent::GoalCaptured { score: state.score });

    state.relocate_goal();
    state.spawn_glitches(state.config.capture_spawn);
    check_escalation(state);
}

/// Apply every escalation the current score has earned
pub fn check_escalation(state: &mut GameState) {
    while let Some(delta) = state.difficulty.escalate(state.score, &state.config) {
        state.spawn_glitches(delta);
        log::info!(
            "Escalation {}: glitch target {}, pulse cooldown {}ms",
            state.difficulty.level,
            state.difficulty.glitch_target,
            state.difficulty.pulse_cooldown_ms
        );
        state.events.push(GameEvent::Escalated {
            level: state.difficulty.level,
            glitch_target: state.difficulty.glitch_target,
            pulse_cooldown_ms: state.difficulty.pulse_cooldown_ms,
        });
    }
}

/// Population above the hard ceiling ends the session
#[inline]
pub fn overflowed(state: &GameState) -> bool {
    state.glitches.len() > state.config.max_glitches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    fn playing_state() -> GameState {
        let mut state = GameState::new(11, GameConfig::default(), 0);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_thresholds_double() {
        let config = GameConfig::default();
        let mut d = Difficulty::new(&config);
        assert_eq!(d.escalate(0, &config), None);
        assert_eq!(d.escalate(64, &config), Some(10));
        assert_eq!(d.glitch_target, 20);
        assert_eq!(d.next_threshold, 128);
        assert_eq!(d.escalate(64, &config), None);
        assert_eq!(d.escalate(128, &config), Some(20));
        assert_eq!(d.escalate(192, &config), None);
        assert_eq!(d.escalate(256, &config), Some(40));
        assert_eq!(d.level, 3);
    }

    #[test]
    fn test_cooldown_floor() {
        let config = GameConfig::default();
        let mut d = Difficulty::new(&config);
        let mut score = 64;
        for _ in 0..20 {
            d.escalate(score, &config);
            score *= 2;
        }
        assert_eq!(d.pulse_cooldown_ms, config.pulse_cooldown_floor_ms);
    }

    #[test]
    fn test_capture_scores_and_recorrupts() {
        let mut state = playing_state();
        state.goal.is_corrupted = false;
        let before = state.glitches.len();

        capture_goal(&mut state);

        assert_eq!(state.score, 64);
        assert!(state.goal.is_corrupted);
        let dist = state.goal.center().distance(state.player.center());
        assert!(dist > state.config.goal_safe_distance);
        // Ratchet plus first escalation delta
        assert_eq!(state.glitches.len(), before + 1 + 10);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GoalCaptured { score: 64 })));
    }

    #[test]
    fn test_multiple_thresholds_in_one_jump() {
        let mut state = playing_state();
        state.score = 300;
        check_escalation(&mut state);
        // 64, 128 and 256 all crossed
        assert_eq!(state.difficulty.level, 3);
        assert_eq!(state.difficulty.glitch_target, 80);
        assert_eq!(state.glitches.len(), 80);
    }

    #[test]
    fn test_overflow() {
        let config = GameConfig {
            max_glitches: 12,
            ..Default::default()
        };
        let mut state = GameState::new(1, config, 0);
        assert!(!overflowed(&state));
        state.spawn_glitches(3);
        assert!(overflowed(&state));
    }
}
