use super::direction::Direction;
use super::grid::Cell;
use std::collections::VecDeque;

/// A snake on the grid.
///
/// The head is the front of `segments`.  No cell ever appears in `segments`
/// twice.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) segments: VecDeque<Cell>,

    /// The direction in which the snake last moved
    pub(super) current_direction: Direction,

    /// The direction in which the snake will move on the next tick
    pub(super) pending_direction: Direction,
}

impl Snake {
    /// Create a one-segment snake at `head` facing in `direction`
    pub(crate) fn new(head: Cell, direction: Direction) -> Snake {
        Snake {
            segments: VecDeque::from([head]),
            current_direction: direction,
            pending_direction: direction,
        }
    }

    pub(crate) fn head(&self) -> Cell {
        // `segments` is never empty
        self.segments[0]
    }

    pub(crate) fn segments(&self) -> &VecDeque<Cell> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn contains(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub(crate) fn current_direction(&self) -> Direction {
        self.current_direction
    }

    pub(crate) fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Request that the snake move in `direction` on the next tick.  A
    /// request to reverse onto its own neck is refused.  Returns whether the
    /// request was accepted.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.current_direction.opposite() {
            false
        } else {
            self.pending_direction = direction;
            true
        }
    }

    /// Move the head to `head`, dropping the tail unless `grow` is true, and
    /// record the pending direction as the one actually taken.
    pub(super) fn slither(&mut self, head: Cell, grow: bool) {
        self.segments.push_front(head);
        if !grow {
            let _ = self.segments.pop_back();
        }
        self.current_direction = self.pending_direction;
    }
}
