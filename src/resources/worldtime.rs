//! Frame-stepped clock resource.
//!
//! The main loop is the only driver of time: it feeds the frame delta into
//! [`WorldTime`] once per iteration, and every time-dependent system reads
//! from here instead of touching a system clock.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Seconds since startup, scaled.
    pub elapsed: f32,
    /// Scaled delta of the current frame, seconds.
    pub delta: f32,
    /// Multiplier applied to incoming deltas; 1.0 is real time.
    pub time_scale: f32,
    /// Frames stepped since startup.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Step the clock by one frame of `dt` unscaled seconds.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}
