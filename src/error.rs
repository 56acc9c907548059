//! Error types shared across the engine.
//!
//! Every fallible operation in the store hierarchy and the backend setup
//! path returns [`StageResult`]. Errors are raised at the point of detection
//! and propagated to the caller; nothing in the engine retries internally.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for store and backend operations.
#[derive(Error, Debug)]
pub enum StageError {
    /// A resource path did not resolve on disk. Checked before any store
    /// mutation, so a failed load never leaves a partial entry behind.
    #[error("resource not found: '{}'", path.display())]
    ResourceNotFound { path: PathBuf },

    /// An image file exists but could not be decoded.
    #[error("could not decode image '{}': {message}", path.display())]
    DecodeFailure { path: PathBuf, message: String },

    /// An animation descriptor is syntactically or geometrically invalid.
    #[error("invalid animation descriptor '{}': {message}", path.display())]
    InvalidDescriptor { path: PathBuf, message: String },

    /// A store was addressed with an index at or past its current size.
    ///
    /// Indices are dense and append-only, so any index below the size
    /// reported at the time of the call stays valid until the owning stage
    /// resets its stores.
    #[error("invalid {store} index {index} (store holds {len} entries)")]
    IndexOutOfRange {
        store: &'static str,
        index: usize,
        len: usize,
    },

    /// The rendering backend failed to come up. Fatal; surfaced once at
    /// startup and never retried.
    #[error("render backend initialization failed: {0}")]
    BackendInit(String),
}

pub type StageResult<T> = Result<T, StageError>;
