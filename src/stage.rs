//! The stage: exclusive owner of the resource store hierarchy.
//!
//! [`Stage`] composes the three stores by value, in dependency order:
//! textures at the bottom, animations referencing textures, layers
//! referencing animations. Cross-store wiring happens through split borrows
//! of the stage's own fields at the call site, so the compiler guarantees
//! the owner outlives every store and no store can dangle.
//!
//! Destructive clearing always runs as a cascade from the requested depth
//! down to the layers: clearing textures without also clearing the
//! animations and layers that reference them would leave stale indices, so
//! that case cannot be expressed. The per-store purge hooks are
//! crate-private; [`Stage::reset_stores`] is the only door.

use std::path::Path;

use log::info;
use raylib::prelude::{RaylibDrawHandle, RaylibThread};

use crate::error::StageResult;
use crate::resources::animationstore::AnimationStore;
use crate::resources::layerstore::AnimationLayerStore;
use crate::resources::texturestore::TextureStore;

/// How deep a store reset reaches. Each depth clears its own store and
/// every store that depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetDepth {
    /// Clear textures, animations, and layers.
    Textures,
    /// Clear animations and layers.
    Animations,
    /// Clear layers only.
    Layers,
}

impl ResetDepth {
    /// Dependency order, shallowest dependency first. A reset starts at the
    /// requested depth and runs to the end of this list.
    pub const CASCADE: [ResetDepth; 3] = [
        ResetDepth::Textures,
        ResetDepth::Animations,
        ResetDepth::Layers,
    ];
}

/// Owner of the texture, animation, and layer stores.
#[derive(Default)]
pub struct Stage {
    textures: TextureStore,
    animations: AnimationStore,
    layers: AnimationLayerStore,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureStore {
        &mut self.textures
    }

    pub fn animations(&self) -> &AnimationStore {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut AnimationStore {
        &mut self.animations
    }

    pub fn layers(&self) -> &AnimationLayerStore {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut AnimationLayerStore {
        &mut self.layers
    }

    /// Register an animation descriptor, loading its sheet into the texture
    /// cache. Idempotent per filename.
    pub fn load_animation(&mut self, path: impl AsRef<Path>) -> StageResult<usize> {
        self.animations.add_animation(&mut self.textures, path)
    }

    /// Advance every registered animation by one tick.
    pub fn advance_all(&mut self) {
        self.animations.advance_all();
    }

    /// Rewind every animation to its first frame, keeping all entries.
    pub fn reset_phases(&mut self) {
        self.animations.reset_phases();
    }

    /// Draw one animation's current frame.
    pub fn put_animation(
        &mut self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        index: usize,
        x: i32,
        y: i32,
    ) -> StageResult<()> {
        self.animations
            .put(d, thread, &mut self.textures, index, x, y)
    }

    /// Draw every layer in paint order.
    pub fn put_layers(
        &mut self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
    ) -> StageResult<()> {
        self.layers
            .put_all(d, thread, &mut self.textures, &self.animations)
    }

    /// Destructively clear stores from `depth` downward.
    ///
    /// The cascade is an explicit ordered list: requesting a shallower
    /// depth always performs strictly more work, never less.
    pub fn reset_stores(&mut self, depth: ResetDepth) {
        let start = ResetDepth::CASCADE
            .iter()
            .position(|&d| d == depth)
            .unwrap_or(0);
        for step in &ResetDepth::CASCADE[start..] {
            match step {
                ResetDepth::Textures => self.textures.purge(),
                ResetDepth::Animations => self.animations.purge(),
                ResetDepth::Layers => self.layers.purge(),
            }
        }
        info!("stores reset from depth {depth:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_lists_every_depth_in_dependency_order() {
        assert_eq!(
            ResetDepth::CASCADE,
            [
                ResetDepth::Textures,
                ResetDepth::Animations,
                ResetDepth::Layers
            ]
        );
    }

    #[test]
    fn layer_reset_spares_lower_stores() {
        let mut stage = Stage::new();
        stage.layers_mut().add_layer("background");
        stage.reset_stores(ResetDepth::Layers);
        assert_eq!(stage.layers().len(), 0);
        assert_eq!(stage.animations().len(), 0);
        assert_eq!(stage.textures().len(), 0);
    }
}
