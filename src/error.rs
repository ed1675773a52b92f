use std::path::PathBuf;

use crate::scene::SceneId;

/// Errors that can stop the application or a scene frame
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Any failure reported by SDL2 (it reports errors as strings)
    #[error("SDL error: {0}")]
    Sdl(String),

    /// Config file exists but could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key binding names a key SDL2 doesn't know
    #[error("Unknown key name in bindings: {0}")]
    InvalidKey(String),

    /// Transition targets a scene that was never added to the window
    #[error("Scene {0:?} is not registered with the window")]
    SceneNotRegistered(SceneId),

    /// Asset could not be loaded (logged, never fatal)
    #[error("Failed to load {path}: {message}")]
    Asset { path: PathBuf, message: String },
}

impl From<String> for AppError {
    fn from(message: String) -> Self {
        AppError::Sdl(message)
    }
}
