use super::direction::Direction;
use super::grid::Cell;
use crate::consts;
use std::collections::VecDeque;

/// The snake: where its head is, where its body trails behind, and which way
/// it is going.
///
/// All positions are in grid units relative to the top-left corner of the
/// board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Cell,

    /// The positions of the cells in the snake's body, nearest the head
    /// first
    pub(super) body: VecDeque<Cell>,

    /// The direction in which the snake moved on its most recent step
    pub(super) heading: Direction,

    /// The direction in which the snake will move on its next step
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a new one-cell snake at `head` facing in `direction`
    pub(crate) fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
            heading: direction,
            direction,
        }
    }

    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Iterate over every occupied cell, head first
    #[cfg(test)]
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Number of cells the snake occupies
    #[cfg(test)]
    pub(crate) fn segments(&self) -> usize {
        self.body.len() + 1
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.heading {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    /// Request that the snake move in `direction` on its next step.  Turning
    /// back the way the snake last moved is ignored, no matter how many turns
    /// are requested between two steps.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if direction != self.heading.reverse() {
            self.direction = direction;
        }
    }

    /// The cell the head will move into on the next step
    pub(crate) fn next_head(&self) -> Cell {
        self.direction.step(self.head())
    }

    /// Move the head into `cell`, which should be [`Snake::next_head()`].
    /// The tail is left in place; call [`Snake::drop_tail()`] unless the
    /// snake is growing.
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(self.head);
        self.head = cell;
        self.heading = self.direction;
    }

    pub(crate) fn drop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}
