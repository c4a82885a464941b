use thiserror::Error;

use crate::field::Coord;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("the board needs at least one cell")]
    EmptyBoard,
    #[error("a {width}x{height} board is too large")]
    TooLarge { width: usize, height: usize },
    #[error("{mines} mines don't fit on a board of {cells} cells with a safe first click")]
    TooManyMines { mines: usize, cells: usize },
    #[error("{0:?} is outside the board")]
    OutOfBounds(Coord),
}
