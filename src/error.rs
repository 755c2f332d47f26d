use crate::config::ConfigError;
use std::error::Error;
use std::io;
use thiserror::Error;

/// Everything that can stop the game loop. The game itself has no failure
/// modes; these all come from the collaborators it is wired to.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("peripheral i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("sound playback failed: {0}")]
    Sound(String),
}

impl GameError {
    /// sound players report boxed errors
    pub fn sound(e: Box<dyn Error>) -> Self {
        GameError::Sound(e.to_string())
    }
}
