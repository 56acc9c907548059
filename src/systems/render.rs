//! Frame composition.
//!
//! Rendering happens inside raylib's drawing scope: layers paint in
//! registration order through the store hierarchy, then the active visual
//! effect (if running) draws over the finished frame, fully on top.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::effects::ActiveEffect;
use crate::stage::Stage;

const CLEAR_COLOR: Color = Color::DARKGRAY;

/// Exclusive render system: opens the draw scope, composites layers, then
/// overlays the active effect.
///
/// The raylib handle and thread leave the world for the duration of the
/// draw scope so the pass can borrow the rest of the world freely.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(thread) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };

    {
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(CLEAR_COLOR);
        render_pass(world, &mut d, &thread);
    }

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
}

/// Paint one frame: every layer in order, then the effect overlay.
pub fn render_pass(world: &mut World, d: &mut RaylibDrawHandle, thread: &RaylibThread) {
    {
        let mut stage = world.non_send_resource_mut::<Stage>();
        if let Err(e) = stage.put_layers(d, thread) {
            log::warn!("layer draw failed: {e}");
        }
    }

    let active = world.resource::<ActiveEffect>();
    if let Some(effect) = active.0.as_ref()
        && effect.is_running()
    {
        effect.render(d);
    }
}
