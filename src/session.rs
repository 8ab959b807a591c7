//! Host glue: display callbacks in, simulation steps and side effects out
//!
//! A [`Session`] owns the game state, the fixed-timestep clock and the external
//! collaborators. It is what a platform front-end drives once per frame.

use crate::audio::{AudioSink, SoundEffect};
use crate::config::{EffectSettings, GameConfig};
use crate::highscores::HighScoreStore;
use crate::sim::{FrameClock, GameEvent, GameState, TickInput, tick};

pub struct Session<S: HighScoreStore, A: AudioSink> {
    pub state: GameState,
    clock: FrameClock,
    store: S,
    audio: A,
    /// Latched input for the next step
    input: TickInput,
    /// Last held-key snapshot, for edge detection
    held: TickInput,
    /// Events from the most recent step, kept for the presentation layer
    last_events: Vec<GameEvent>,
}

impl<S: HighScoreStore, A: AudioSink> Session<S, A> {
    /// Read the stored high score once and sit on the title screen
    pub fn new(seed: u64, config: GameConfig, store: S, audio: A) -> Self {
        let high_score = store.get();
        Self {
            state: GameState::new(seed, config, high_score),
            clock: FrameClock::default(),
            store,
            audio,
            input: TickInput::default(),
            held: TickInput::default(),
            last_events: Vec::new(),
        }
    }

    pub fn with_effects(mut self, settings: EffectSettings) -> Self {
        self.state.fx.settings = settings;
        self
    }

    /// Merge this frame's input snapshot. Held directions replace the previous
    /// ones; one-shot actions stay latched until a step consumes them.
    pub fn set_input(&mut self, input: TickInput) {
        self.input = TickInput {
            dash: self.input.dash || input.dash,
            pulse: self.input.pulse || input.pulse,
            confirm: self.input.confirm || input.confirm,
            ..input
        };
    }

    /// Merge a held-keys snapshot (keyboard). Holding an action key fires it
    /// once; it has to be released before it fires again.
    pub fn set_held_input(&mut self, held: TickInput) {
        let pressed = held.pressed_since(&self.held);
        self.held = held;
        self.set_input(pressed);
    }

    /// Display callback. Returns true if a simulation step ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.clock.advance(now_ms) {
            return false;
        }
        self.step(now_ms);
        true
    }

    /// Run exactly one simulation step and dispatch its side effects
    pub fn step(&mut self, now_ms: f64) {
        let input = self.input;
        tick(&mut self.state, &input, now_ms);

        // Clear one-shot inputs after processing
        self.input.dash = false;
        self.input.pulse = false;
        self.input.confirm = false;

        self.last_events = self.state.drain_events();
        for event in &self.last_events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            if let GameEvent::NewHighScore { score } = event {
                self.store.set(*score);
            }
        }
    }

    /// Events produced by the most recent step
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    pub fn fps(&self) -> u32 {
        self.clock.fps()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::{DeathCause, GamePhase, Glitch};
    use glam::Vec2;

    #[derive(Default)]
    struct RecordingAudio(Vec<SoundEffect>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn session(stored: u64) -> Session<MemoryStore, RecordingAudio> {
        Session::new(
            21,
            GameConfig::default(),
            MemoryStore::new(stored),
            RecordingAudio::default(),
        )
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_reads_stored_high_score() {
        let s = session(777);
        assert_eq!(s.state.high_score, 777);
        assert_eq!(s.state.phase, GamePhase::Start);
    }

    #[test]
    fn test_confirm_latched_until_step() {
        let mut s = session(0);
        assert!(!s.frame(0.0));

        s.set_input(confirm());
        // Too early: coalesced, confirm stays latched
        assert!(!s.frame(5.0));
        s.set_input(TickInput::default());
        assert!(s.frame(20.0));
        assert_eq!(s.state.phase, GamePhase::Playing);
        assert_eq!(s.audio().0, vec![SoundEffect::Collect]);
    }

    #[test]
    fn test_new_high_score_persisted_once() {
        let mut s = session(100);
        s.set_input(confirm());
        s.step(0.0);

        s.state.glitches.clear();
        s.state.goal.pos = Vec2::new(600.0, 440.0);
        s.state.goal.vel = Vec2::ZERO;
        s.state.score = 256;
        let id = s.state.next_entity_id();
        let pos = s.state.player.pos + Vec2::new(4.0, -4.0);
        s.state.glitches.push(Glitch {
            id,
            pos,
            vel: Vec2::ZERO,
            size: 12.0,
            color: 0xff0000,
        });

        s.set_input(TickInput {
            move_right: true,
            ..Default::default()
        });
        s.step(16.0);

        assert_eq!(s.state.phase, GamePhase::GameOver);
        assert_eq!(s.store().get(), 256);
        assert_eq!(s.store().writes, 1);
        assert!(s.last_events().contains(&GameEvent::PlayerDied {
            cause: DeathCause::Glitch
        }));
        assert_eq!(s.audio().0.last(), Some(&SoundEffect::Hit));

        // Idle ticks on the game over screen never write again
        for i in 0..10 {
            s.step(32.0 + i as f64 * 16.0);
        }
        assert_eq!(s.store().writes, 1);
    }

    #[test]
    fn test_effect_settings_reach_the_simulation() {
        let mut s = session(0).with_effects(EffectSettings {
            particles: false,
            trails: false,
            ..Default::default()
        });
        s.set_input(confirm());
        s.step(0.0);

        s.state.glitches.clear();
        let id = s.state.next_entity_id();
        let pos = s.state.player.pos + Vec2::new(20.0, 0.0);
        s.state.glitches.push(Glitch {
            id,
            pos,
            vel: Vec2::ZERO,
            size: 12.0,
            color: 0xff0000,
        });
        s.set_input(TickInput {
            move_right: true,
            pulse: true,
            ..Default::default()
        });
        s.step(16.0);

        assert!(s.state.glitches.is_empty());
        assert!(s.state.fx.particles.is_empty());
        assert!(s.state.fx.trail.is_empty());
    }

    #[test]
    fn test_held_pulse_fires_once() {
        let mut s = session(0);
        s.set_held_input(confirm());
        s.step(0.0);
        assert_eq!(s.state.phase, GamePhase::Playing);
        s.state.glitches.clear();

        let held = TickInput {
            pulse: true,
            ..Default::default()
        };
        let mut fired = 0;
        // Well past several cooldowns
        for i in 1..60 {
            s.set_held_input(held);
            s.step(i as f64 * 16.0);
            fired += s
                .last_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PulseFired { .. }))
                .count();
        }
        assert_eq!(fired, 1);

        s.set_held_input(TickInput::default());
        s.step(60.0 * 16.0);
        s.set_held_input(held);
        s.step(61.0 * 16.0);
        assert!(s
            .last_events()
            .iter()
            .any(|e| matches!(e, GameEvent::PulseFired { .. })));
    }

    #[test]
    fn test_held_confirm_does_not_restart() {
        let mut s = session(0);
        s.set_held_input(confirm());
        s.step(0.0);
        s.state.glitches.clear();
        s.state.goal.pos = Vec2::new(600.0, 440.0);
        s.state.goal.vel = Vec2::ZERO;
        let id = s.state.next_entity_id();
        let pos = s.state.player.pos + Vec2::new(4.0, -4.0);
        s.state.glitches.push(Glitch {
            id,
            pos,
            vel: Vec2::ZERO,
            size: 12.0,
            color: 0xff0000,
        });

        // Confirm still held while running into the glitch
        s.set_held_input(TickInput {
            move_right: true,
            ..confirm()
        });
        s.step(16.0);
        assert_eq!(s.state.phase, GamePhase::GameOver);
        s.set_held_input(confirm());
        s.step(32.0);
        assert_eq!(s.state.phase, GamePhase::GameOver);

        s.set_held_input(TickInput::default());
        s.step(48.0);
        s.set_held_input(confirm());
        s.step(64.0);
        assert_eq!(s.state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pulse_plays_shoot() {
        let mut s = session(0);
        s.set_input(confirm());
        s.step(0.0);
        s.set_input(TickInput {
            pulse: true,
            ..Default::default()
        });
        s.step(16.0);
        assert!(s.audio().0.contains(&SoundEffect::Shoot));
    }
}
