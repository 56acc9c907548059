//! Texture store: the leaf cache of the resource hierarchy.
//!
//! Maps a filesystem path to a decoded image, deduplicating by path so the
//! same file is never decoded twice. Entries are addressed by a dense,
//! zero-based index assigned at insertion; the store is append-only and
//! indices stay valid until the owning [`Stage`](crate::stage::Stage) resets
//! its stores.
//!
//! Decoding and GPU upload are split: raylib cannot create GPU textures
//! before the window exists, so [`TextureStore::load`] only decodes the
//! image CPU-side. The texture is uploaded on first draw and cached in the
//! entry.

use std::path::{Path, PathBuf};

use log::debug;
use raylib::prelude::{Image, RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

use crate::error::{StageError, StageResult};

/// One cached image: source path, decoded pixels, and the GPU texture once
/// the first draw has uploaded it.
struct TextureSlot {
    path: String,
    image: Image,
    gpu: Option<Texture2D>,
}

/// Append-only cache of decoded images keyed by source path.
#[derive(Default)]
pub struct TextureStore {
    by_path: FxHashMap<String, usize>,
    slots: Vec<TextureSlot>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Load an image, or return the index it already has.
    ///
    /// The path must resolve on disk before anything is mutated; a failed
    /// load never leaves a partial entry behind.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StageResult<usize> {
        let path = path.as_ref();
        let key = path.to_string_lossy().into_owned();

        if let Some(&index) = self.by_path.get(&key) {
            return Ok(index);
        }

        if !path.exists() {
            return Err(StageError::ResourceNotFound {
                path: PathBuf::from(path),
            });
        }

        let image = Image::load_image(&key).map_err(|message| StageError::DecodeFailure {
            path: PathBuf::from(path),
            message,
        })?;

        let index = self.slots.len();
        debug!(
            "texture {index}: '{key}' ({}x{})",
            image.width(),
            image.height()
        );
        self.by_path.insert(key.clone(), index);
        self.slots.push(TextureSlot {
            path: key,
            image,
            gpu: None,
        });
        Ok(index)
    }

    /// Source path of an entry.
    pub fn path(&self, index: usize) -> StageResult<&str> {
        self.slot(index).map(|slot| slot.path.as_str())
    }

    /// Pixel dimensions of an entry.
    pub fn dimension(&self, index: usize) -> StageResult<(i32, i32)> {
        self.slot(index)
            .map(|slot| (slot.image.width(), slot.image.height()))
    }

    /// Index of a previously loaded path, if any.
    pub fn find_by_path(&self, path: impl AsRef<Path>) -> Option<usize> {
        self.by_path
            .get(path.as_ref().to_string_lossy().as_ref())
            .copied()
    }

    /// GPU texture for an entry, uploading the decoded image on first use.
    pub fn texture(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        index: usize,
    ) -> StageResult<&Texture2D> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(StageError::IndexOutOfRange {
                store: "texture",
                index,
                len,
            })?;
        match slot.gpu {
            Some(ref texture) => Ok(texture),
            None => {
                let texture = rl
                    .load_texture_from_image(thread, &slot.image)
                    .map_err(StageError::BackendInit)?;
                Ok(slot.gpu.insert(texture))
            }
        }
    }

    /// Drop every entry. Only the owning stage's reset cascade may call
    /// this; clearing textures alone would leave animations pointing at
    /// freed slots.
    pub(crate) fn purge(&mut self) {
        self.by_path.clear();
        self.slots.clear();
    }

    fn slot(&self, index: usize) -> StageResult<&TextureSlot> {
        self.slots.get(index).ok_or(StageError::IndexOutOfRange {
            store: "texture",
            index,
            len: self.slots.len(),
        })
    }
}
