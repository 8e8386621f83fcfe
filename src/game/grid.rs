use crate::consts;
use ratatui::layout::{Position, Size};

/// A square on the board, in grid units.  Coordinates are signed so that a
/// head which has stepped off the board can still be represented.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i16,
    pub(crate) y: i16,
}

impl Cell {
    pub(crate) const fn new(x: i16, y: i16) -> Cell {
        Cell { x, y }
    }
}

/// The dimensions of the playfield
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: i16,
    pub(crate) height: i16,
}

impl Grid {
    pub(crate) const fn new(width: i16, height: i16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Convert `cell` to a terminal position relative to the top-left corner
    /// of the board's interior.  Returns `None` for cells off the board.
    pub(crate) fn to_position(self, cell: Cell) -> Option<Position> {
        if !self.contains(cell) {
            return None;
        }
        let x = u16::try_from(cell.x).ok()?.checked_mul(consts::CELL_WIDTH)?;
        let y = u16::try_from(cell.y).ok()?;
        Some(Position { x, y })
    }

    /// Size of the board's interior in terminal cells
    pub(crate) fn display_size(self) -> Size {
        let width = u16::try_from(self.width).unwrap_or_default();
        let height = u16::try_from(self.height).unwrap_or_default();
        Size {
            width: width.saturating_mul(consts::CELL_WIDTH),
            height,
        }
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(consts::GRID_CELLS, consts::GRID_CELLS)
    }
}
