//! Rendering layers over the animation registry.
//!
//! A layer is a named, ordered list of placed animation instances. Layers
//! reference animations by store index and never own them; the same
//! animation may appear in any number of layers. Drawing a layer walks its
//! sprites in insertion order, and drawing the store walks layers in
//! insertion order, so z-ordering falls out of registration order without
//! per-sprite bookkeeping.

use raylib::prelude::{RaylibDrawHandle, RaylibThread};

use crate::error::{StageError, StageResult};
use crate::resources::animationstore::AnimationStore;
use crate::resources::texturestore::TextureStore;

/// One placed animation instance within a layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerSprite {
    /// Index into the owning stage's [`AnimationStore`].
    pub animation: usize,
    pub x: i32,
    pub y: i32,
    /// Rotation in degrees around the frame center.
    pub angle: f32,
}

/// A named paint-ordered group of sprites.
pub struct AnimationLayer {
    name: String,
    sprites: Vec<LayerSprite>,
}

impl AnimationLayer {
    fn new(name: String) -> Self {
        Self {
            name,
            sprites: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sprites(&self) -> &[LayerSprite] {
        &self.sprites
    }

    /// Append a sprite; later sprites paint over earlier ones.
    pub fn add_sprite(&mut self, animation: usize, x: i32, y: i32, angle: f32) {
        self.sprites.push(LayerSprite {
            animation,
            x,
            y,
            angle,
        });
    }

    /// Remove every sprite from this layer, keeping the layer itself.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }
}

/// Append-only collection of [`AnimationLayer`]s in paint order.
#[derive(Default)]
pub struct AnimationLayerStore {
    layers: Vec<AnimationLayer>,
}

impl AnimationLayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a new empty layer and return its index.
    pub fn add_layer(&mut self, name: impl Into<String>) -> usize {
        self.layers.push(AnimationLayer::new(name.into()));
        self.layers.len() - 1
    }

    pub fn layer(&self, index: usize) -> StageResult<&AnimationLayer> {
        self.layers.get(index).ok_or(self.out_of_range(index))
    }

    pub fn layer_mut(&mut self, index: usize) -> StageResult<&mut AnimationLayer> {
        let err = self.out_of_range(index);
        self.layers.get_mut(index).ok_or(err)
    }

    /// Linear scan for a layer name.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name == name)
    }

    /// Draw one layer, sprites in insertion order.
    pub fn put(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        animations: &AnimationStore,
        index: usize,
    ) -> StageResult<()> {
        let layer = self.layer(index)?;
        for sprite in &layer.sprites {
            animations.put_rotated(
                d,
                thread,
                textures,
                sprite.animation,
                sprite.x,
                sprite.y,
                sprite.angle,
            )?;
        }
        Ok(())
    }

    /// Draw every layer in registration order.
    pub fn put_all(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        animations: &AnimationStore,
    ) -> StageResult<()> {
        for index in 0..self.layers.len() {
            self.put(d, thread, textures, animations, index)?;
        }
        Ok(())
    }

    /// Drop every layer. Only the owning stage's reset cascade may call this.
    pub(crate) fn purge(&mut self) {
        self.layers.clear();
    }

    fn out_of_range(&self, index: usize) -> StageError {
        StageError::IndexOutOfRange {
            store: "layer",
            index,
            len: self.layers.len(),
        }
    }
}
