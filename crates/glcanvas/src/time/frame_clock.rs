/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Platform timestamp passed to the frame callback, in milliseconds.
    pub now_ms: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots from scheduler timestamps.
///
/// The browser hands every animation-frame callback a high-resolution
/// timestamp in milliseconds; the clock turns consecutive timestamps into
/// clamped deltas. There is no wall clock here, so the clock works the same
/// under `wasm32` and in tests.
///
/// Delta time is clamped to avoid pathological values when the tab is
/// backgrounded, the debugger pauses, or timestamps arrive out of order.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    frame_index: u64,
    dt_min: f32,
    dt_max: f32,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms to 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(0.0001, 0.25)
    }

    /// Creates a clock with custom delta-time clamps, in seconds.
    pub fn with_clamps(dt_min: f32, dt_max: f32) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last_ms: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Number of ticks so far.
    pub fn frames(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock to `now_ms` and returns a new `FrameTime`.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let raw = match self.last_ms {
            Some(last) if now_ms.is_finite() => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        let dt = raw.clamp(self.dt_min, self.dt_max);

        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }

        let ft = FrameTime {
            dt,
            now_ms,
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
