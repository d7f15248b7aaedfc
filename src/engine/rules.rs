use super::food::Food;
use super::grid::{Cell, Grid};
use super::snake::Snake;

/// What happened to the snake during one tick
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum StepResult {
    /// The snake moved one cell without eating
    Moved(Snake),

    /// The snake moved onto the food, growing by one segment
    Ate { snake: Snake, points: u32 },

    /// The snake's head hit something
    Crashed(Collision),
}

/// What the snake's head hit when it crashed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The head tried to leave the grid
    Wall,

    /// The head ran into the snake's own body at the given cell
    Body(Cell),
}

/// Advance `snake` one cell in its pending direction.
///
/// The tail cell does not count as an obstacle unless the snake eats this
/// tick, as the tail moves out of the way at the same time as the head moves
/// in.
pub(crate) fn step(snake: &Snake, food: &Food, grid: Grid) -> StepResult {
    let Some(head) = grid.shift(snake.head(), snake.pending_direction()) else {
        return StepResult::Crashed(Collision::Wall);
    };
    let eats = head == food.cell;
    let keep = if eats {
        snake.len()
    } else {
        snake.len() - 1
    };
    if snake.segments().iter().take(keep).any(|&c| c == head) {
        return StepResult::Crashed(Collision::Body(head));
    }
    let mut moved = snake.clone();
    moved.slither(head, eats);
    if eats {
        StepResult::Ate {
            snake: moved,
            points: food.kind.points(),
        }
    } else {
        StepResult::Moved(moved)
    }
}
