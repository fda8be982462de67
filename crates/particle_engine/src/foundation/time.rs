//! Frame timing for hosts driving the simulation

use std::time::Instant;

/// Frame clock producing per-frame delta times in seconds
///
/// The engine never reads a clock itself; hosts feed `delta_time()` into
/// `Emitter::update` / `ParticleSystem::update`.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: Option<f32>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: None,
        }
    }

    /// Clamp every reported delta to at most `max_delta` seconds
    ///
    /// Keeps a stalled frame (debugger, window drag) from launching every
    /// particle across the screen in one step.
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = Some(max_delta);
        self
    }

    /// Update the timer from the wall clock (call once per frame)
    pub fn update(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(elapsed)
    }

    /// Advance the timer by an explicit step, for fixed-step or headless hosts
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        self.delta_time = match self.max_delta {
            Some(max) => elapsed.min(max),
            None => elapsed,
        };
        self.total_time += self.delta_time;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
