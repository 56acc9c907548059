//! Current framebuffer dimensions in pixels.
//!
//! Updated by the main loop on resize; read by the render pass and by
//! effects when they compute their prepare-time geometry.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    pub w: i32,
    pub h: i32,
}

impl ScreenSize {
    pub fn dimension(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}
