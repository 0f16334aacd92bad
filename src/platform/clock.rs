//! Display-refresh timestamps to fixed simulation steps

use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};

/// Longest frame gap honored (ms); longer gaps (hidden tab) are dropped
pub const MAX_FRAME_MS: f64 = 100.0;

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp; returns the timestamp of each step to run,
    /// oldest first. The last step lands on `time_ms`.
    pub fn advance(&mut self, time_ms: f64) -> Vec<f64> {
        let elapsed = match self.last_time {
            Some(last) if time_ms.is_finite() => (time_ms - last).clamp(0.0, MAX_FRAME_MS),
            _ => SIM_DT_MS,
        };
        if time_ms.is_finite() {
            self.last_time = Some(time_ms);
        }
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= SIM_DT_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT_MS;
            steps += 1;
        }
        // Prevent spiral of death: drop backlog beyond one step
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT_MS);
        }

        let now = self.last_time.unwrap_or(0.0);
        (0..steps)
            .map(|i| now - (steps - 1 - i) as f64 * SIM_DT_MS)
            .collect()
    }

    /// Forget timing history (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_step() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1000.0), vec![1000.0]);
    }

    #[test]
    fn test_steady_60hz() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let mut total = 0;
        for i in 1..=60 {
            total += clock.advance(i as f64 * SIM_DT_MS).len();
        }
        assert!((59..=61).contains(&total), "ran {} steps", total);
    }

    #[test]
    fn test_fast_display_skips_frames() {
        // 120 Hz display runs a step every other frame
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let mut total = 0;
        for i in 1..=120 {
            total += clock.advance(i as f64 * SIM_DT_MS / 2.0).len();
        }
        assert!((59..=61).contains(&total), "ran {} steps", total);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let steps = clock.advance(5000.0);
        assert_eq!(steps.len(), MAX_SUBSTEPS as usize);
        assert_eq!(*steps.last().unwrap(), 5000.0);
        // Timestamps increase within the frame
        assert!(steps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_backwards_time_runs_nothing() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        assert!(clock.advance(900.0).is_empty());
    }
}
