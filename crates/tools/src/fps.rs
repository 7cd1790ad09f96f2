use std::time::{Duration, Instant};

/// Frames-per-second counter.
///
/// Owned by the application state and ticked once per frame; the frame
/// counter and window timestamp are instance fields, so independent loops can
/// run independent counters.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    window_start: Instant,
    current: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
            current: 0.0,
        }
    }

    /// Count one frame. Returns the refreshed rate when the one-second sample
    /// window rolls over.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.current = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.window_start = now;
            return Some(self.current);
        }
        None
    }

    /// Rate measured over the last completed window.
    pub fn fps(&self) -> f32 {
        self.current
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_rollover_reports_rate() {
        let mut counter = FpsCounter::new();
        let start = Instant::now();
        for _ in 0..59 {
            assert_eq!(counter.tick(start), None);
        }
        let rate = counter.tick(start + Duration::from_secs(2)).unwrap();
        // 60 frames over two seconds.
        assert!((rate - 30.0).abs() < 0.5);
        assert_eq!(counter.fps(), rate);
    }

    #[test]
    fn counters_are_independent_instances() {
        let mut a = FpsCounter::new();
        let mut b = FpsCounter::new();
        let start = Instant::now();

        for _ in 0..10 {
            a.tick(start);
        }
        a.tick(start + Duration::from_secs(1));
        // b stays inside its first sample window.
        b.tick(start);

        assert!(a.fps() > 0.0);
        assert_eq!(b.fps(), 0.0);
    }
}
