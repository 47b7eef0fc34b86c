use glam::IVec2;

use crate::error::{Error, Result};

/// Tile code: 0 is passable, anything else is a solid wall of that material.
pub type Tile = u32;

pub const EMPTY: Tile = 0;

/// Fixed-size occupancy map, row-major, indexed by `(col, row)` = `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// All-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![EMPTY; width * height],
        }
    }

    /// Build from rows of tile codes; every row must have the same length.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let mut tiles = Vec::with_capacity(width * height);

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.len() != width {
                return Err(Error::OutOfBounds {
                    col: line.len() as i32,
                    row: row as i32,
                    width,
                    height,
                });
            }
            tiles.extend_from_slice(line);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// Tile at `cell`, or `None` outside the grid.
    pub fn get(&self, cell: IVec2) -> Option<Tile> {
        self.index(cell).map(|idx| self.tiles[idx])
    }

    /// Cells outside the grid are never solid.
    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(|tile| tile != EMPTY)
    }

    /// Place a wall of `material` at `(col, row)`.
    pub fn set_solid(&mut self, col: i32, row: i32, material: Tile) -> Result<()> {
        if material == EMPTY {
            return Err(Error::InvalidMaterial(material));
        }

        let idx = self.index(IVec2::new(col, row)).ok_or(Error::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        })?;

        log::debug!("placing material {material} at ({col}, {row})");
        self.tiles[idx] = material;
        Ok(())
    }

    /// Iterate `(cell, tile)` over every tile, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(idx, tile)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (IVec2::new(x as i32, y as i32), *tile)
        })
    }
}
