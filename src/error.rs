use thiserror::Error;

use crate::grid::Tile;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("cannot normalize a zero-length direction")]
    DegenerateDirection,
    #[error("tile ({col}, {row}) out of bounds for grid {width}x{height}")]
    OutOfBounds {
        col: i32,
        row: i32,
        width: usize,
        height: usize,
    },
    #[error("tile ({col}, {row}) is occupied by the player")]
    Occupied { col: i32, row: i32 },
    #[error("material {0} is not solid")]
    InvalidMaterial(Tile),
}

pub type Result<T> = std::result::Result<T, Error>;
