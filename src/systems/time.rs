//! Time update.
//!
//! The main loop feeds the raw frame delta into
//! [`WorldTime`](crate::resources::worldtime::WorldTime) once per iteration;
//! everything else reads time from the resource.

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Step the shared clock by one frame of `dt` unscaled seconds.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}
