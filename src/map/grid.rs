//! The static walkability grid the maze is played on.

use bevy_ecs::resource::Resource;
use glam::IVec2;

use crate::error::MapError;
use crate::map::layout::{MapId, MapPalette};

/// An immutable, rectangular matrix of cell codes. `0` is floor, anything else is wall.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cell codes.
    cells: Vec<u8>,
    palette: MapPalette,
}

impl Grid {
    /// Builds the grid for a built-in map.
    pub fn for_map(id: MapId) -> Grid {
        let rows = id.rows();
        Grid {
            width: rows.first().map_or(0, |row| row.len()),
            height: rows.len(),
            cells: rows.iter().flat_map(|row| row.iter().copied()).collect(),
            palette: id.palette(),
        }
    }

    /// Builds the grid for a map identifier, using the default map for unknown ids.
    pub fn from_id(id: &str) -> Grid {
        Self::for_map(MapId::resolve(id))
    }

    /// Builds a grid from arbitrary rows, validating that it is non-empty and rectangular.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Grid, MapError> {
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MapError::NotRectangular {
                    row: row_index,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Grid {
            width,
            height: rows.len(),
            cells,
            palette: MapId::DEFAULT.palette(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn palette(&self) -> MapPalette {
        self.palette
    }

    /// Returns the cell code at a tile, or `None` when out of bounds.
    pub fn cell(&self, tile: IVec2) -> Option<u8> {
        if tile.x < 0 || tile.y < 0 {
            return None;
        }
        let (x, y) = (tile.x as usize, tile.y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.width + x])
    }

    /// True only for in-bounds floor cells.
    pub fn is_walkable(&self, tile: IVec2) -> bool {
        self.cell(tile) == Some(0)
    }

    /// All floor tiles in row-major order.
    pub fn walkable_tiles(&self) -> Vec<IVec2> {
        (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| IVec2::new(x, y)))
            .filter(|&tile| self.is_walkable(tile))
            .collect()
    }

    /// Straight-line visibility between two tiles.
    ///
    /// Only tiles sharing a row or column can see each other, and every cell strictly
    /// between them must be walkable. The endpoints themselves are not checked.
    pub fn has_line_of_sight(&self, from: IVec2, to: IVec2) -> bool {
        if from.x == to.x {
            let (start, end) = (from.y.min(to.y), from.y.max(to.y));
            return ((start + 1)..end).all(|y| self.is_walkable(IVec2::new(from.x, y)));
        }
        if from.y == to.y {
            let (start, end) = (from.x.min(to.x), from.x.max(to.x));
            return ((start + 1)..end).all(|x| self.is_walkable(IVec2::new(x, from.y)));
        }
        false
    }

    /// Iterates every cell as `(tile, walkable)`, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (IVec2, bool)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &code)| {
            let tile = IVec2::new((i % self.width) as i32, (i / self.width) as i32);
            (tile, code == 0)
        })
    }
}

/// Manhattan distance between two tiles.
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
