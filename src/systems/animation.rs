//! Animation advance system.
//!
//! Ticks every registered animation once per rendered frame, in
//! registration order. Frame pacing comes from the main loop's target FPS;
//! the store itself has no notion of wall-clock time.

use bevy_ecs::prelude::*;

use crate::stage::Stage;

/// Advance all animation phases by one tick.
///
/// The stage is a non-send resource because its texture cache owns raylib
/// handles.
pub fn advance_animations(mut stage: NonSendMut<Stage>) {
    stage.advance_all();
}
