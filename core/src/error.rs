use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 1x1 and match the declared size")]
    InvalidDimensions,
    #[error("Too many mines, requested {requested} but a board of {total} tiles needs a safe tile")]
    TooManyMines { requested: u32, total: CellCount },
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure to load a [`GameConfig`](crate::GameConfig) from text.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] GameError),
}
