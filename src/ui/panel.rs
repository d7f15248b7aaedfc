use super::food_color;
use crate::consts;
use crate::engine::{FoodType, Snapshot};
use crate::util::{format_elapsed, EnumExt};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

/// The side panel showing the score, speed, play time, food legend, and key
/// bindings
#[derive(Clone, Copy, Debug)]
pub(super) struct Panel<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Panel<'a> {
    pub(super) fn new(snapshot: &'a Snapshot) -> Panel<'a> {
        Panel { snapshot }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            stat_line("Score:", self.snapshot.score),
            stat_line("High Score:", self.snapshot.high_score),
            stat_line("Speed:", self.snapshot.difficulty),
            stat_line("Time:", format_elapsed(self.snapshot.elapsed_seconds)),
            Line::default(),
            Line::styled("Food", consts::HEADING_STYLE),
        ];
        lines.extend(FoodType::iter().map(food_line));
        lines.extend([
            Line::default(),
            Line::styled("Controls", consts::HEADING_STYLE),
            key_line("←↑↓→ wasd", "Move"),
            key_line("p Space", "Pause"),
            key_line("r", "Restart"),
            key_line("1-4", "Difficulty"),
            key_line("q", "Quit"),
        ]);
        lines
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (line, row) in self.lines().into_iter().zip(area.rows()) {
            line.render(row, buf);
        }
    }
}

fn stat_line<T: ToString>(label: &str, value: T) -> Line<'static> {
    Line::from_iter([
        Span::raw(format!("{label:<12}")),
        Span::styled(value.to_string(), consts::VALUE_STYLE),
    ])
}

fn food_line(kind: FoodType) -> Line<'static> {
    let points = kind.points();
    Line::from_iter([
        Span::styled(
            consts::FOOD_SYMBOL.to_string(),
            Style::new().fg(food_color(kind)),
        ),
        Span::raw(format!(
            " {kind:<8} {points} {}",
            if points == 1 { "point" } else { "points" }
        )),
    ])
}

fn key_line(keys: &str, action: &str) -> Line<'static> {
    Line::from_iter([
        Span::styled(format!("{keys:<11}"), consts::KEY_STYLE),
        Span::raw(action.to_owned()),
    ])
}
