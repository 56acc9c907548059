//! Spritestage library.
//!
//! Resource-management and rendering-orchestration core for 2D sprite
//! animation: a texture → animation → layer store hierarchy with cascading
//! reset, plus time-driven screen-wide visual effects. Exposed as a library
//! for integration tests and reuse by host applications.

pub mod effects;
pub mod error;
pub mod events;
pub mod resources;
pub mod stage;
pub mod systems;
