//! Sound effects
//!
//! The simulation only names events; sinks turn them into sound. On the web the
//! effects are synthesized with the Web Audio API - no external files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Pulse fired - falling square zap
    Shoot,
    /// Player died - dirty sawtooth crunch
    Hit,
    /// Goal recovered or session started - rising sine chirp
    Collect,
    /// Dash started - short whoosh
    Dash,
}

impl SoundEffect {
    /// Sound triggered by a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PulseFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::PlayerDied { .. } => Some(SoundEffect::Hit),
            GameEvent::GoalCaptured { .. } | GameEvent::SessionStarted => {
                Some(SoundEffect::Collect)
            }
            GameEvent::DashStarted => Some(SoundEffect::Dash),
            _ => None,
        }
    }
}

/// Fire-and-forget audio output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Logs effects instead of playing them (headless native runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx: {:?}", effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};

    /// Audio manager for the browser
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                muted: false,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// One oscillator sweeping `from` -> `to` over `dur` seconds
        fn sweep(
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            linear: bool,
            level: f32,
            dur: f64,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            osc.frequency().set_value_at_time(from, t).ok();
            if linear {
                gain.gain().linear_ramp_to_value_at_time(0.01, t + dur).ok();
                osc.frequency().linear_ramp_to_value_at_time(to, t + dur).ok();
            } else {
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + dur)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to, t + dur)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(t + dur).ok();
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Shoot => {
                    Self::sweep(ctx, OscillatorType::Square, 550.0, 100.0, false, vol * 0.1, 0.1)
                }
                SoundEffect::Hit => {
                    Self::sweep(ctx, OscillatorType::Sawtooth, 150.0, 0.1, false, vol * 0.2, 0.1)
                }
                SoundEffect::Collect => {
                    Self::sweep(ctx, OscillatorType::Sine, 600.0, 1200.0, true, vol * 0.1, 0.1)
                }
                SoundEffect::Dash => {
                    Self::sweep(ctx, OscillatorType::Triangle, 200.0, 800.0, false, vol * 0.08, 0.08)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::DeathCause;
    use glam::Vec2;

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PulseFired { center: Vec2::ZERO }),
            Some(SoundEffect::Shoot)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerDied {
                cause: DeathCause::Overflow
            }),
            Some(SoundEffect::Hit)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GoalCaptured { score: 64 }),
            Some(SoundEffect::Collect)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::DashStarted),
            Some(SoundEffect::Dash)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::GoalPurified { pos: Vec2::ZERO }),
            None
        );
    }
}
