use std::time::{Duration, Instant};

/// Smallest delta a tick may report.
pub const MIN_FRAME_DELTA: Duration = Duration::from_millis(1);

/// Frame clock - tracks delta time between rendered frames
/// Delta is floored so the GUI never sees a zero or negative step
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    frame_index: u64,
}

impl FrameClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create clock with an explicit baseline
    pub fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_tick: now,
            frame_index: 0,
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Advance the clock to `now`, returns delta in seconds
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now
            .saturating_duration_since(self.last_tick)
            .max(MIN_FRAME_DELTA);
        // Never move the baseline backwards.
        self.last_tick = self.last_tick.max(now);
        self.frame_index = self.frame_index.wrapping_add(1);
        delta.as_secs_f32()
    }

    /// Seconds since the clock was created, measured at the last tick
    pub fn elapsed(&self) -> f64 {
        self.last_tick.duration_since(self.start).as_secs_f64()
    }

    /// Number of ticks so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clock_measures_delta() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        let delta = clock.tick();

        assert!(delta >= 0.009 && delta <= 0.5);
    }

    #[test]
    fn identical_timestamps_still_advance() {
        let now = Instant::now();
        let mut clock = FrameClock::starting_at(now);

        let first = clock.tick_at(now);
        let second = clock.tick_at(now);

        assert!(first > 0.0);
        assert!(second > 0.0);
        assert_eq!(second, MIN_FRAME_DELTA.as_secs_f32());
    }

    #[test]
    fn earlier_timestamp_is_floored() {
        let now = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::starting_at(now);

        let delta = clock.tick_at(now - Duration::from_millis(500));
        assert_eq!(delta, MIN_FRAME_DELTA.as_secs_f32());

        // Baseline stays at the later instant.
        let delta = clock.tick_at(now + Duration::from_millis(20));
        assert!((delta - 0.020).abs() < 1e-4);
    }

    #[test]
    fn counts_frames_and_elapsed() {
        let now = Instant::now();
        let mut clock = FrameClock::starting_at(now);

        clock.tick_at(now + Duration::from_millis(16));
        clock.tick_at(now + Duration::from_millis(32));

        assert_eq!(clock.frame_index(), 2);
        assert!((clock.elapsed() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn clock_resets() {
        let mut clock = FrameClock::new();

        thread::sleep(Duration::from_millis(10));
        clock.reset();

        let delta = clock.tick();
        assert!(delta < 0.005);
    }
}
