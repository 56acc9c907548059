//! Engine configuration resource.
//!
//! Settings come from an INI file; every field has a safe default so the
//! engine starts without one. Missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! title = spritestage
//! target_fps = 60
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;

const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TITLE: &str = "spritestage";
const DEFAULT_CONFIG_PATH: &str = "./spritestage.ini";

/// Window and timing settings.
#[derive(Resource, Debug, Clone)]
pub struct StageConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Frames per second the main loop paces itself to.
    pub target_fps: u32,
    pub title: String,
    pub config_path: PathBuf,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StageConfig {
    /// Configuration with default values and the default file path.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.into(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Same defaults, different file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load settings from the INI file, keeping defaults for missing keys.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| format!("failed to load config file: {e}"))?;

        if let Some(width) = ini.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = ini.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = ini.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(title) = ini.get("window", "title") {
            self.title = title;
        }

        info!(
            "loaded config: {}x{} window, fps={}, title='{}'",
            self.window_width, self.window_height, self.target_fps, self.title
        );
        Ok(())
    }

    /// Write the current settings back out.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut ini = Ini::new();
        ini.set("window", "width", Some(self.window_width.to_string()));
        ini.set("window", "height", Some(self.window_height.to_string()));
        ini.set("window", "target_fps", Some(self.target_fps.to_string()));
        ini.set("window", "title", Some(self.title.clone()));
        ini.write(&self.config_path)
            .map_err(|e| format!("failed to save config file: {e}"))?;
        Ok(())
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
