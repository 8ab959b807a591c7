//! Fixed timestep gate for display callbacks
//!
//! Callbacks arriving faster than the step are coalesced. Slow callbacks still
//! advance a single step, so a struggling display slows the game down instead
//! of spiralling into catch-up work.

use crate::consts::SIM_STEP_MS;

/// Number of callbacks averaged for the FPS estimate
const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    step_ms: f64,
    accumulator: f64,
    last_ms: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_STEP_MS)
    }
}

impl FrameClock {
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_ms,
            accumulator: 0.0,
            last_ms: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Feed a display callback timestamp. Returns true when one simulation step
    /// should run.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.track_fps(now_ms);

        let elapsed = match self.last_ms.replace(now_ms) {
            Some(last) => (now_ms - last).max(0.0),
            // The very first callback only establishes the time base
            None => return false,
        };

        self.accumulator += elapsed;
        if self.accumulator < self.step_ms {
            return false;
        }
        // One step at most; a backlog of a whole step or more is dropped
        self.accumulator -= self.step_ms;
        if self.accumulator >= self.step_ms {
            self.accumulator = 0.0;
        }
        true
    }

    /// Rolling frames-per-second over the last 60 callbacks
    pub fn fps(&self) -> u32 {
        self.fps
    }

    fn track_fps(&mut self, now_ms: f64) {
        self.frame_times[self.frame_index] = now_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot after the newest holds the oldest sample
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = now_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(clock: &mut FrameClock, start: f64, interval: f64, callbacks: usize) -> usize {
        (1..=callbacks)
            .filter(|i| clock.advance(start + *i as f64 * interval))
            .count()
    }

    #[test]
    fn test_first_callback_does_not_step() {
        let mut clock = FrameClock::default();
        assert!(!clock.advance(1000.0));
    }

    #[test]
    fn test_fast_display_is_coalesced() {
        let mut clock = FrameClock::default();
        clock.advance(1000.0);
        // 144 Hz for one second: roughly 60 steps
        let n = steps(&mut clock, 1000.0, 1000.0 / 144.0, 144);
        assert!((58..=61).contains(&n), "got {n}");
    }

    #[test]
    fn test_slow_display_steps_once_per_callback() {
        let mut clock = FrameClock::default();
        clock.advance(1000.0);
        // 20 Hz: every callback steps exactly once, no catch-up
        let n = steps(&mut clock, 1000.0, 50.0, 20);
        assert_eq!(n, 20);
    }

    #[test]
    fn test_long_stall_yields_single_step() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        assert!(clock.advance(5000.0));
        // A tiny follow-up interval does not trigger catch-up
        assert!(!clock.advance(5001.0));
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::default();
        for i in 1..=120 {
            clock.advance(i as f64 * 1000.0 / 60.0);
        }
        assert!((59..=61).contains(&clock.fps()), "got {}", clock.fps());
    }
}
