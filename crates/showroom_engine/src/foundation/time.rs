//! Frame timing

use std::time::Instant;

/// Frame clock
///
/// Wall-clock measurement ([`Timer::tick`]) is kept apart from frame
/// accounting ([`Timer::advance`]) so frames driven with a fixed step count
/// the same way as frames from the render loop.
pub struct Timer {
    last_tick: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a timer with no frames recorded
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Seconds since the previous tick (or since creation)
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Record one rendered frame lasting `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Duration of the last recorded frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Sum of all recorded frame durations
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of recorded frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average frames per second over the recorded frames
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
