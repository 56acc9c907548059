//! Long-lived data injected into the ECS world and read by systems.
//!
//! Overview
//! - `texturestore` – decoded images deduplicated by path, lazy GPU upload
//! - `animationstore` – sprite sheet animations deduplicated by filename
//! - `layerstore` – paint-ordered layers of placed animation instances
//! - `stageconfig` – window/timing settings from an INI file
//! - `screensize` – current framebuffer dimensions in pixels
//! - `worldtime` – frame-stepped clock fed by the main loop
//!
//! The three stores are not inserted individually: they live inside
//! [`Stage`](crate::stage::Stage), which the main loop inserts as a
//! non-send resource because the texture cache holds raylib handles.
pub mod animationstore;
pub mod layerstore;
pub mod screensize;
pub mod stageconfig;
pub mod texturestore;
pub mod worldtime;
