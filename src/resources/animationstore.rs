//! Animation registry built on top of the texture cache.
//!
//! An [`Animation`] is one loaded sprite sheet: a texture index, frame
//! geometry, and the current frame ("phase"). The [`AnimationStore`] owns
//! every animation, deduplicates by descriptor filename, and addresses
//! entries by dense insertion-order indices, mirroring the texture cache one
//! level below it.
//!
//! Animations are described by a small JSON file next to the sheet:
//!
//! ```json
//! { "sheet": "walk.png", "frame_width": 32, "frame_height": 32, "looped": true }
//! ```
//!
//! Frames are read left-to-right, top-to-bottom off the sheet; the frame
//! count is whatever full frames fit the sheet dimensions.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use raylib::prelude::{Color, RaylibDraw, RaylibDrawHandle, RaylibThread, Rectangle, Vector2};
use serde::Deserialize;

use crate::error::{StageError, StageResult};
use crate::resources::texturestore::TextureStore;

/// On-disk description of a sprite sheet animation.
#[derive(Debug, Deserialize)]
struct AnimationDescriptor {
    /// Sheet image path, relative to the descriptor file.
    sheet: String,
    frame_width: i32,
    frame_height: i32,
    #[serde(default = "default_looped")]
    looped: bool,
}

fn default_looped() -> bool {
    true
}

/// A sprite sheet bound to a cached texture, with a frame cursor.
pub struct Animation {
    sheet: usize,
    frame_width: i32,
    frame_height: i32,
    frame_count: usize,
    phase: usize,
    looped: bool,
}

impl Animation {
    fn new(sheet: usize, frame_width: i32, frame_height: i32, frame_count: usize, looped: bool) -> Self {
        Self {
            sheet,
            frame_width,
            frame_height,
            frame_count,
            phase: 0,
            looped,
        }
    }

    /// Texture store index of the backing sheet.
    pub fn sheet(&self) -> usize {
        self.sheet
    }

    /// Current frame index.
    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Width and height of a single frame.
    pub fn dimension(&self) -> (i32, i32) {
        (self.frame_width, self.frame_height)
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Advance the frame cursor by one tick. Looped animations wrap to
    /// frame zero; non-looped ones hold the final frame.
    pub fn advance(&mut self) {
        let next = self.phase + 1;
        if next >= self.frame_count {
            if self.looped {
                self.phase = 0;
            }
        } else {
            self.phase = next;
        }
    }

    /// Rewind to the first frame without touching anything else.
    pub fn reset_phase(&mut self) {
        self.phase = 0;
    }

    /// Source rectangle of the current frame on the sheet.
    pub fn frame_rect(&self, sheet_width: i32) -> Rectangle {
        let cols = (sheet_width / self.frame_width).max(1) as usize;
        let col = self.phase % cols;
        let row = self.phase / cols;
        Rectangle {
            x: (col as i32 * self.frame_width) as f32,
            y: (row as i32 * self.frame_height) as f32,
            width: self.frame_width as f32,
            height: self.frame_height as f32,
        }
    }

    /// Draw the current frame with its top-left corner at `(x, y)`.
    pub fn put(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        x: i32,
        y: i32,
    ) -> StageResult<()> {
        self.draw(d, thread, textures, x, y, 0.0)
    }

    /// Draw the current frame rotated by `angle` degrees around its center,
    /// keeping the unrotated top-left corner at `(x, y)`.
    pub fn put_rotated(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        x: i32,
        y: i32,
        angle: f32,
    ) -> StageResult<()> {
        self.draw(d, thread, textures, x, y, angle)
    }

    fn draw(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        x: i32,
        y: i32,
        angle: f32,
    ) -> StageResult<()> {
        let (sheet_width, _) = textures.dimension(self.sheet)?;
        let src = self.frame_rect(sheet_width);
        let w = self.frame_width as f32;
        let h = self.frame_height as f32;
        // Rotation pivots on the frame center; dest places that pivot.
        let dest = Rectangle {
            x: x as f32 + w * 0.5,
            y: y as f32 + h * 0.5,
            width: w,
            height: h,
        };
        let origin = Vector2 {
            x: w * 0.5,
            y: h * 0.5,
        };
        let texture = textures.texture(d, thread, self.sheet)?;
        d.draw_texture_pro(texture, src, dest, origin, angle, Color::WHITE);
        Ok(())
    }
}

/// Dedup-by-filename registry of [`Animation`]s.
///
/// Append-only: entries are created by [`add_animation`](Self::add_animation)
/// and destroyed only by the owning stage's reset cascade. Every index
/// accessor is bounds-checked and returns
/// [`StageError::IndexOutOfRange`] on a stale or invalid index.
#[derive(Default)]
pub struct AnimationStore {
    filenames: Vec<String>,
    animations: Vec<Animation>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Register the animation described by `path`, or return the index it
    /// already has.
    ///
    /// The descriptor must exist on disk before anything is mutated. The
    /// sheet is loaded through the shared texture cache, so two descriptors
    /// pointing at the same sheet share one texture.
    pub fn add_animation(
        &mut self,
        textures: &mut TextureStore,
        path: impl AsRef<Path>,
    ) -> StageResult<usize> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StageError::ResourceNotFound {
                path: PathBuf::from(path),
            });
        }

        let key = path.to_string_lossy().into_owned();
        if let Some(index) = self.find_by_filename(&key) {
            return Ok(index);
        }

        let descriptor = read_descriptor(path)?;
        let sheet_path = match path.parent() {
            Some(dir) => dir.join(&descriptor.sheet),
            None => PathBuf::from(&descriptor.sheet),
        };
        let sheet = textures.load(&sheet_path)?;
        let (sheet_w, sheet_h) = textures.dimension(sheet)?;

        let cols = sheet_w / descriptor.frame_width;
        let rows = sheet_h / descriptor.frame_height;
        let frame_count = (cols * rows) as usize;
        if frame_count == 0 {
            return Err(StageError::InvalidDescriptor {
                path: PathBuf::from(path),
                message: format!(
                    "sheet is {sheet_w}x{sheet_h} but a single frame is {}x{}",
                    descriptor.frame_width, descriptor.frame_height
                ),
            });
        }

        let index = self.animations.len();
        info!(
            "animation {index}: '{key}' ({frame_count} frames of {}x{})",
            descriptor.frame_width, descriptor.frame_height
        );
        self.animations.push(Animation::new(
            sheet,
            descriptor.frame_width,
            descriptor.frame_height,
            frame_count,
            descriptor.looped,
        ));
        self.filenames.push(key);
        Ok(index)
    }

    pub fn animation(&self, index: usize) -> StageResult<&Animation> {
        self.animations
            .get(index)
            .ok_or(self.out_of_range(index))
    }

    pub fn animation_mut(&mut self, index: usize) -> StageResult<&mut Animation> {
        let err = self.out_of_range(index);
        self.animations.get_mut(index).ok_or(err)
    }

    /// Descriptor filename an entry was registered under.
    pub fn filename(&self, index: usize) -> StageResult<&str> {
        self.filenames
            .get(index)
            .map(String::as_str)
            .ok_or(self.out_of_range(index))
    }

    /// Frame dimensions of an entry.
    pub fn dimension(&self, index: usize) -> StageResult<(i32, i32)> {
        self.animation(index).map(Animation::dimension)
    }

    /// Linear scan for a registered filename.
    pub fn find_by_filename(&self, filename: &str) -> Option<usize> {
        self.filenames.iter().position(|f| f == filename)
    }

    /// Advance one animation's phase by one tick.
    pub fn advance_animation(&mut self, index: usize) -> StageResult<()> {
        self.animation_mut(index)?.advance();
        Ok(())
    }

    /// Advance every animation by one tick, in registration order. Called
    /// once per rendered frame by the timing loop.
    pub fn advance_all(&mut self) {
        for animation in &mut self.animations {
            animation.advance();
        }
    }

    /// Rewind every animation to its first frame. Entries stay registered;
    /// this is the non-destructive counterpart of the stage reset cascade.
    pub fn reset_phases(&mut self) {
        for animation in &mut self.animations {
            animation.reset_phase();
        }
    }

    /// Draw one animation's current frame at `(x, y)`.
    pub fn put(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        index: usize,
        x: i32,
        y: i32,
    ) -> StageResult<()> {
        self.animation(index)?.put(d, thread, textures, x, y)
    }

    /// Draw one animation's current frame rotated by `angle` degrees.
    pub fn put_rotated(
        &self,
        d: &mut RaylibDrawHandle,
        thread: &RaylibThread,
        textures: &mut TextureStore,
        index: usize,
        x: i32,
        y: i32,
        angle: f32,
    ) -> StageResult<()> {
        self.animation(index)?
            .put_rotated(d, thread, textures, x, y, angle)
    }

    /// Drop every entry. Filenames and animations clear together under one
    /// `&mut self`, so no caller can observe one list emptied and not the
    /// other. Only the owning stage's reset cascade may call this.
    pub(crate) fn purge(&mut self) {
        self.filenames.clear();
        self.animations.clear();
    }

    fn out_of_range(&self, index: usize) -> StageError {
        StageError::IndexOutOfRange {
            store: "animation",
            index,
            len: self.animations.len(),
        }
    }
}

fn read_descriptor(path: &Path) -> StageResult<AnimationDescriptor> {
    let text = fs::read_to_string(path).map_err(|e| StageError::InvalidDescriptor {
        path: PathBuf::from(path),
        message: e.to_string(),
    })?;
    let descriptor: AnimationDescriptor =
        serde_json::from_str(&text).map_err(|e| StageError::InvalidDescriptor {
            path: PathBuf::from(path),
            message: e.to_string(),
        })?;
    if descriptor.frame_width <= 0 || descriptor.frame_height <= 0 {
        return Err(StageError::InvalidDescriptor {
            path: PathBuf::from(path),
            message: "frame dimensions must be positive".into(),
        });
    }
    Ok(descriptor)
}
