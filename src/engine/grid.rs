use super::direction::Direction;
use crate::consts;
use rand::Rng;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// A position on the grid, measured from the top-left corner
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: u16,
    pub(crate) y: u16,
}

impl Cell {
    pub(crate) const fn new(x: u16, y: u16) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square playing field `side` cells across
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "u16")]
pub(crate) struct Grid {
    side: u16,
}

impl Grid {
    pub(crate) const MIN_SIDE: u16 = 5;
    /// The largest side whose board, drawn two grid rows per terminal row
    /// inside a border, still fits in the display area
    pub(crate) const MAX_SIDE: u16 = (consts::DISPLAY_SIZE.height - 2) * 2;

    pub(crate) fn new(side: u16) -> Result<Grid, GridSizeError> {
        if (Self::MIN_SIDE..=Self::MAX_SIDE).contains(&side) {
            Ok(Grid { side })
        } else {
            Err(GridSizeError(side))
        }
    }

    pub(crate) fn side(self) -> u16 {
        self.side
    }

    /// Number of cells on the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }

    pub(crate) fn in_bounds(self, cell: Cell) -> bool {
        cell.x < self.side && cell.y < self.side
    }

    /// The cell at which new snakes are born
    pub(crate) fn center_cell(self) -> Cell {
        Cell::new(self.side / 2, self.side / 2)
    }

    /// Return the cell one step from `cell` in `direction`, or `None` if that
    /// step would leave the grid.
    pub(crate) fn shift(self, cell: Cell, direction: Direction) -> Option<Cell> {
        let Cell { mut x, mut y } = cell;
        match direction {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1)?,
        }
        Some(Cell { x, y }).filter(|&c| self.in_bounds(c))
    }

    /// Pick a cell uniformly at random
    pub(crate) fn random_cell<R: Rng>(self, rng: &mut R) -> Cell {
        Cell::new(rng.random_range(0..self.side), rng.random_range(0..self.side))
    }

    /// Iterate over every cell in row-major order
    #[cfg(test)]
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        let side = self.side;
        (0..side).flat_map(move |y| (0..side).map(move |x| Cell::new(x, y)))
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid { side: 35 }
    }
}

impl TryFrom<u16> for Grid {
    type Error = GridSizeError;

    fn try_from(side: u16) -> Result<Grid, GridSizeError> {
        Grid::new(side)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("grid size {0} is out of range; must be between {min} and {max}", min = Grid::MIN_SIDE, max = Grid::MAX_SIDE)]
pub(crate) struct GridSizeError(u16);
