//! Per-frame systems run by the main loop's schedule.
//!
//! - `time` – steps the shared frame clock
//! - `animation` – advances every animation phase by one tick
//! - `effects` – drives the active visual effect with elapsed time
//! - `render` – composites layers and the effect overlay
pub mod animation;
pub mod effects;
pub mod render;
pub mod time;
