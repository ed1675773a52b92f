//! Application configuration
//!
//! Everything tunable without a rebuild lives here: window geometry, asset
//! locations, external links, key bindings and the level counter bounds.
//! The config is a JSON file; any field left out falls back to its default,
//! and a missing file means "all defaults".

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "AMAZE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,

    /// Directory every asset path is relative to
    pub resource_root: PathBuf,

    pub assets: AssetPaths,
    pub links: Links,
    pub bindings: BindingConfig,
    pub level_bounds: LevelBounds,

    /// Program (and args) started by the map maker button, if any
    pub level_maker_command: Option<Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            window: WindowConfig::default(),
            resource_root: PathBuf::from("res"),
            assets: AssetPaths::default(),
            links: Links::default(),
            bindings: BindingConfig::default(),
            level_bounds: LevelBounds::default(),
            level_maker_command: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frames per second cap for the display loop
    pub frame_limit: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 800,
            title: "aMaze".to_string(),
            frame_limit: 60,
        }
    }
}

/// Asset locations, relative to `resource_root`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub font: PathBuf,
    pub background: PathBuf,
    pub wall: PathBuf,
    pub play: PathBuf,
    pub play_selected: PathBuf,
    pub map_maker: PathBuf,
    pub map_maker_selected: PathBuf,
    pub instructions: PathBuf,
    pub instructions_selected: PathBuf,
    pub exit: PathBuf,
    pub exit_selected: PathBuf,
    pub music_on: PathBuf,
    pub music_on_selected: PathBuf,
    pub music_off: PathBuf,
    pub music_off_selected: PathBuf,
    pub web: PathBuf,
    pub web_selected: PathBuf,
    pub background_music: PathBuf,
    pub click: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        let gfx = |name: &str| PathBuf::from("menuGraphics").join(name);
        AssetPaths {
            font: PathBuf::from("fonts/Maze.ttf"),
            background: gfx("Background.png"),
            wall: gfx("Wall.png"),
            play: gfx("Play.png"),
            play_selected: gfx("PlaySelected.png"),
            map_maker: gfx("MapMaker.png"),
            map_maker_selected: gfx("MapMakerSelected.png"),
            instructions: gfx("Instructions.png"),
            instructions_selected: gfx("InstructionsSelected.png"),
            exit: gfx("Exit.png"),
            exit_selected: gfx("ExitSelected.png"),
            music_on: gfx("MusicOn.png"),
            music_on_selected: gfx("MusicOnSelected.png"),
            music_off: gfx("MusicOff.png"),
            music_off_selected: gfx("MusicOffSelected.png"),
            web: gfx("Web.png"),
            web_selected: gfx("WebSelected.png"),
            background_music: PathBuf::from("audio/background.ogg"),
            click: PathBuf::from("beep.wav"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub web: String,
    pub instructions: String,
}

impl Default for Links {
    fn default() -> Self {
        Links {
            web: "https://github.com/amaze-game/amaze".to_string(),
            instructions: "https://github.com/amaze-game/amaze#how-to-play".to_string(),
        }
    }
}

/// Key names use SDL2's naming (`Keycode::from_name`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub music_toggle: String,
    pub web_link: String,
    pub joystick_confirm: u8,
}

impl Default for BindingConfig {
    fn default() -> Self {
        BindingConfig {
            music_toggle: "M".to_string(),
            web_link: "W".to_string(),
            joystick_confirm: 0,
        }
    }
}

/// Optional limits for the level counter; unset means unbounded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelBounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl LevelBounds {
    /// Saturate `level` into the configured range
    pub fn clamp(&self, level: i32) -> i32 {
        let level = match self.min {
            Some(min) => level.max(min),
            None => level,
        };
        match self.max {
            Some(max) => level.min(max),
            None => level,
        }
    }
}

impl AppConfig {
    /// Location of the config file: `$AMAZE_CONFIG`, else the platform config dir
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("amaze").join("config.json"))
    }

    /// Load the config from its default location, falling back to defaults
    pub fn load() -> Result<Self, AppError> {
        match Self::default_path() {
            Some(path) => Self::load_from_file(&path),
            None => {
                log::info!("No config directory available, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load config from `path`; a missing file yields the defaults
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Full path of an asset relative to the resource root
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.resource_root.join(relative)
    }
}
