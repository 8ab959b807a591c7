//! Ephemeral visual state
//!
//! Fed by simulation events, read by the renderer. Nothing here is read back by
//! collision or scoring.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::config::EffectSettings;
use crate::consts::*;

/// Expanding ring drawn after a pulse
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PulseEffect {
    pub active: bool,
    pub center: Vec2,
    pub radius: f32,
}

/// Ghost of a past player position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// 1.0 when recorded, fades to 0
    pub opacity: f32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// Remaining life in ticks
    pub life: u32,
}

/// All cosmetic state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effects {
    pub settings: EffectSettings,
    pub pulse: PulseEffect,
    /// Shake magnitude in units, decays every tick
    pub screen_shake: f32,
    /// White flash intensity (0-1)
    pub flash: f32,
    /// Newest first
    pub trail: Vec<TrailPoint>,
    pub particles: Vec<Particle>,
}

impl Effects {
    pub fn new(settings: EffectSettings) -> Self {
        Self {
            settings,
            pulse: PulseEffect::default(),
            screen_shake: 0.0,
            flash: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            particles: Vec::new(),
        }
    }

    /// Forget everything (session reset)
    pub fn clear(&mut self) {
        self.pulse = PulseEffect::default();
        self.screen_shake = 0.0;
        self.flash = 0.0;
        self.trail.clear();
        self.particles.clear();
    }

    /// React to this tick's events
    pub fn absorb(&mut self, events: &[GameEvent], rng: &mut Pcg32) {
        for event in events {
            match event {
                GameEvent::PulseFired { center } => {
                    self.pulse = PulseEffect {
                        active: true,
                        center: *center,
                        radius: 0.0,
                    };
                    if self.settings.effective_flash() {
                        self.flash = 1.0;
                    }
                }
                GameEvent::GlitchDestroyed { pos, color } => {
                    self.burst(*pos, *color, 8, rng);
                }
                GameEvent::GoalPurified { pos } => {
                    self.burst(*pos, GOAL_COLOR, 16, rng);
                }
                GameEvent::PlayerDied { .. } => {
                    if self.settings.effective_screen_shake() {
                        self.screen_shake = 8.0;
                    }
                }
                _ => {}
            }
        }
    }

    /// Record the player's position for the ghost trail
    pub fn record_trail(&mut self, pos: Vec2) {
        if !self.settings.trails {
            return;
        }
        self.trail.insert(0, TrailPoint { pos, opacity: 1.0 });
        self.trail.truncate(TRAIL_LENGTH);
    }

    /// Advance all timers by one tick
    pub fn update(&mut self, pulse_radius: f32) {
        if self.pulse.active {
            self.pulse.radius += PULSE_RING_SPEED;
            if self.pulse.radius > pulse_radius {
                self.pulse.active = false;
            }
        }

        self.screen_shake *= 0.9;
        if self.screen_shake < 0.01 {
            self.screen_shake = 0.0;
        }

        self.flash *= 0.8;
        if self.flash < 0.01 {
            self.flash = 0.0;
        }

        for point in &mut self.trail {
            point.opacity *= 0.8;
        }
        self.trail.retain(|p| p.opacity > 0.05);

        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel *= 0.95;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    fn burst(&mut self, pos: Vec2, color: u32, count: usize, rng: &mut Pcg32) {
        if !self.settings.particles {
            return;
        }
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = rng.random::<f32>() * std::f32::consts::TAU;
            let speed = 0.5 + rng.random::<f32>() * 2.0;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: rng.random_range(20..40),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pulse_ring_expands_then_stops() {
        let mut fx = Effects::new(EffectSettings::default());
        let mut rng = Pcg32::seed_from_u64(1);
        fx.absorb(
            &[GameEvent::PulseFired { center: Vec2::new(10.0, 10.0) }],
            &mut rng,
        );
        assert!(fx.pulse.active);
        assert_eq!(fx.flash, 1.0);

        for _ in 0..50 {
            fx.update(100.0);
        }
        assert!(fx.pulse.active);
        assert_eq!(fx.pulse.radius, 100.0);

        fx.update(100.0);
        assert!(!fx.pulse.active);
    }

    #[test]
    fn test_destroyed_glitch_spawns_burst() {
        let mut fx = Effects::new(EffectSettings::default());
        let mut rng = Pcg32::seed_from_u64(2);
        fx.absorb(
            &[GameEvent::GlitchDestroyed {
                pos: Vec2::ZERO,
                color: 0xff0000,
            }],
            &mut rng,
        );
        assert_eq!(fx.particles.len(), 8);

        for _ in 0..40 {
            fx.update(100.0);
        }
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_particles_disabled() {
        let mut fx = Effects::new(EffectSettings {
            particles: false,
            ..Default::default()
        });
        let mut rng = Pcg32::seed_from_u64(3);
        fx.absorb(&[GameEvent::GoalPurified { pos: Vec2::ZERO }], &mut rng);
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_trail_fades() {
        let mut fx = Effects::new(EffectSettings::default());
        for i in 0..20 {
            fx.record_trail(Vec2::splat(i as f32));
        }
        assert_eq!(fx.trail.len(), TRAIL_LENGTH);
        assert_eq!(fx.trail[0].pos, Vec2::splat(19.0));

        for _ in 0..20 {
            fx.update(100.0);
        }
        assert!(fx.trail.is_empty());
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut fx = Effects::new(EffectSettings::default());
        let mut rng = Pcg32::seed_from_u64(4);
        fx.absorb(
            &[GameEvent::PlayerDied {
                cause: crate::sim::state::DeathCause::Glitch,
            }],
            &mut rng,
        );
        assert_eq!(fx.screen_shake, 8.0);
        for _ in 0..200 {
            fx.update(100.0);
        }
        assert_eq!(fx.screen_shake, 0.0);
    }
}
