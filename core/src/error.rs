use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Cell value at {0:?} is neither a mine nor its neighbor count")]
    InvalidCellValue(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;
