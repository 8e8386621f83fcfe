use super::grid::Cell;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step from `cell` in this direction.  The result
    /// may lie outside the board.
    pub(crate) fn step(self, cell: Cell) -> Cell {
        let Cell { x, y } = cell;
        match self {
            Direction::Up => Cell::new(x, y.saturating_sub(1)),
            Direction::Down => Cell::new(x, y.saturating_add(1)),
            Direction::Left => Cell::new(x.saturating_sub(1), y),
            Direction::Right => Cell::new(x.saturating_add(1), y),
        }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
