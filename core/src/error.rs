use std::io;
use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, {mines} mines do not leave a safe cell among {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Board must have at least one column and one row")]
    EmptyBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file")]
    Io(#[from] io::Error),
    #[error("Config is missing the {0} value")]
    Missing(&'static str),
    #[error("Config value {name} is not a positive integer: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("Config has unexpected trailing value {0:?}")]
    Trailing(String),
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Could not access leaderboard storage")]
    Io(#[from] io::Error),
    #[error("Player name {0:?} cannot be stored, it contains a comma or line break")]
    InvalidName(String),
    #[error("Game has not been won, there is no score to record")]
    NotWon,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Player name is empty")]
    Empty,
    #[error("Player name is longer than {0} letters")]
    TooLong(usize),
    #[error("Player name may only contain letters, found {0:?}")]
    InvalidChar(char),
}
