//! Frame clock
//!
//! Turns host timestamps (milliseconds, e.g. from `requestAnimationFrame` or
//! `Instant`) into per-tick deltas in seconds.

use crate::consts::MAX_FRAME_DT;

#[derive(Debug, Clone)]
pub struct GameClock {
    last_tick_ms: Option<f64>,
    max_dt: f32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl GameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_tick_ms: None,
            max_dt: max_dt.max(0.0),
        }
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Delta since the previous tick, clamped to `[0, max_dt]`.
    /// The first tick after a reset yields zero.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {}", now_ms);
            return 0.0;
        }
        let dt = match self.last_tick_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        if dt > self.max_dt {
            log::warn!("Frame delta {:.3}s clamped to {:.3}s", dt, self.max_dt);
            self.max_dt
        } else {
            dt.max(0.0)
        }
    }

    /// Restart timing at `now_ms` so a suspended interval counts for nothing
    pub fn resume(&mut self, now_ms: f64) {
        self.last_tick_ms = now_ms.is_finite().then_some(now_ms);
    }

    /// Forget the last timestamp; the next tick yields zero
    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = GameClock::default();
        assert_eq!(clock.advance(5_000.0), 0.0);
        let dt = clock.advance(5_016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_large_gap_is_clamped() {
        let mut clock = GameClock::new(0.1);
        clock.advance(0.0);
        assert_eq!(clock.advance(3_000.0), 0.1);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = GameClock::default();
        clock.advance(1_000.0);
        assert_eq!(clock.advance(900.0), 0.0);
    }

    #[test]
    fn test_resume_skips_suspended_interval() {
        let mut clock = GameClock::new(10.0);
        clock.advance(0.0);
        clock.advance(16.0);
        // suspended from 16ms to 8s
        clock.resume(8_000.0);
        let dt = clock.advance(8_016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_timestamp_is_skipped() {
        let mut clock = GameClock::default();
        clock.advance(1_000.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.advance(f64::INFINITY), 0.0);
        let dt = clock.advance(1_016.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_reset() {
        let mut clock = GameClock::default();
        clock.advance(100.0);
        clock.reset();
        assert_eq!(clock.advance(500.0), 0.0);
    }
}
