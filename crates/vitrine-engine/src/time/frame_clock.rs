use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame, in seconds.
    pub dt: f32,

    /// Total time since the clock was created or last reset.
    pub elapsed: Duration,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Snapshot at a fixed point in time, for callers that do not own a clock.
    pub fn at(elapsed: Duration) -> Self {
        Self { dt: 0.0, elapsed, frame_index: 0 }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `tick()` samples the wall clock. `advance(dt)` moves time forward by an
/// explicit amount, which keeps scripted scroll sessions and tests
/// deterministic. Both paths clamp delta time so a stalled host does not
/// make every pending transition finish in one frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    elapsed: Duration,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms .. 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            elapsed: Duration::ZERO,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline and the elapsed total.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Advances by the wall-clock time since the previous tick.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.step(dt)
    }

    /// Advances by exactly `dt` (after clamping), ignoring the wall clock.
    pub fn advance(&mut self, dt: Duration) -> FrameTime {
        self.step(dt)
    }

    fn step(&mut self, dt: Duration) -> FrameTime {
        let dt = dt.clamp(self.dt_min, self.dt_max);
        self.elapsed += dt;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
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

    #[test]
    fn advance_accumulates_elapsed() {
        let mut clock = FrameClock::new();
        let a = clock.advance(Duration::from_millis(16));
        let b = clock.advance(Duration::from_millis(16));
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert_eq!(b.elapsed, Duration::from_millis(32));
    }

    #[test]
    fn advance_clamps_long_stalls() {
        let mut clock = FrameClock::new();
        let ft = clock.advance(Duration::from_secs(5));
        assert_eq!(ft.elapsed, Duration::from_millis(250));
        assert!((ft.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn reset_zeroes_elapsed() {
        let mut clock = FrameClock::new();
        clock.advance(Duration::from_millis(100));
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(10)).elapsed, Duration::from_millis(10));
    }
}
