use super::food_color;
use crate::consts;
use crate::engine::{Cell, Collision, Grid, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Color,
    widgets::{Block, Widget},
};

/// A widget drawing the playing field inside a border.
///
/// Each terminal cell shows two vertically-adjacent grid cells using
/// half-block glyphs, so the field fits in a standard-height terminal.
#[derive(Clone, Copy, Debug)]
pub(super) struct Board<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Board<'a> {
    pub(super) fn new(snapshot: &'a Snapshot) -> Board<'a> {
        Board { snapshot }
    }

    /// The size of the area needed to draw a board for `grid`, border
    /// included
    pub(super) fn size(grid: Grid) -> Size {
        let side = grid.side();
        Size {
            width: side.saturating_add(2),
            height: side.div_ceil(2).saturating_add(2),
        }
    }

    /// Compute the colour of every grid cell, in row-major order
    fn paint(&self) -> Vec<Option<Color>> {
        let Snapshot {
            grid,
            ref segments,
            food,
            collision,
            ..
        } = *self.snapshot;
        let side = usize::from(grid.side());
        let mut colors = vec![None; grid.area()];
        let mut fill = |cell: Cell, color: Color| {
            if grid.in_bounds(cell) {
                colors[usize::from(cell.y) * side + usize::from(cell.x)] = Some(color);
            }
        };
        fill(food.cell, food_color(food.kind));
        for &cell in segments.iter().skip(1) {
            fill(cell, consts::SNAKE_BODY_COLOR);
        }
        if let Some(&head) = segments.first() {
            fill(head, consts::SNAKE_HEAD_COLOR);
        }
        // Drawn last so that it covers whatever the snake ran into
        match collision {
            Some(Collision::Body(cell)) => fill(cell, consts::COLLISION_COLOR),
            Some(Collision::Wall) => {
                if let Some(&head) = segments.first() {
                    fill(head, consts::COLLISION_COLOR);
                }
            }
            None => (),
        }
        colors
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let inner = block.inner(area);
        block.render(area, buf);
        let colors = self.paint();
        let side = self.snapshot.grid.side();
        let at = |x: u16, y: u16| {
            (y < side)
                .then(|| colors[usize::from(y) * usize::from(side) + usize::from(x)])
                .flatten()
        };
        for (y, row) in (0..side).step_by(2).zip(inner.rows()) {
            for x in 0..side.min(row.width) {
                let Some(cell) = buf.cell_mut((row.x + x, row.y)) else {
                    continue;
                };
                match (at(x, y), at(x, y + 1)) {
                    (Some(top), Some(bottom)) => {
                        cell.set_symbol(consts::UPPER_HALF_BLOCK)
                            .set_fg(top)
                            .set_bg(bottom);
                    }
                    (Some(top), None) => {
                        cell.set_symbol(consts::UPPER_HALF_BLOCK).set_fg(top);
                    }
                    (None, Some(bottom)) => {
                        cell.set_symbol(consts::LOWER_HALF_BLOCK).set_fg(bottom);
                    }
                    (None, None) => (),
                }
            }
        }
    }
}
