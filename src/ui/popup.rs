use crate::consts;
use crate::engine::{SessionState, Snapshot};
use crate::util::format_elapsed;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A bordered message box drawn over the board
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Popup {
    title: &'static str,
    lines: Vec<Line<'static>>,
}

impl Popup {
    /*
     * ┌───── PAUSED ──────┐
     * │ Press p to resume │
     * └───────────────────┘
     */
    fn paused() -> Popup {
        Popup {
            title: " PAUSED ",
            lines: vec![key_hint("p", "resume")],
        }
    }

    fn ready() -> Popup {
        Popup {
            title: " SNAKE ",
            lines: vec![key_hint("r", "start")],
        }
    }

    /*
     * ┌────── GAME OVER ──────┐
     * │    Final Score: 12    │
     * │    Snake Length: 13   │
     * │   Time Played: 1:05   │
     * │                       │
     * │ Press r to play again │
     * └───────────────────────┘
     */
    fn game_over(snapshot: &Snapshot) -> Popup {
        Popup {
            title: " GAME OVER ",
            lines: vec![
                Line::from(format!("Final Score: {}", snapshot.score)),
                Line::from(format!("Snake Length: {}", snapshot.segments.len())),
                Line::from(format!(
                    "Time Played: {}",
                    format_elapsed(snapshot.elapsed_seconds)
                )),
                Line::default(),
                key_hint("r", "play again"),
            ],
        }
    }

    /// Return the pop-up to show for the given state of play, if any
    pub(super) fn for_snapshot(snapshot: &Snapshot) -> Option<Popup> {
        match snapshot.state {
            SessionState::Initializing => Some(Popup::ready()),
            SessionState::Running => None,
            SessionState::Paused => Some(Popup::paused()),
            SessionState::GameOver => Some(Popup::game_over(snapshot)),
        }
    }

    /// The size of the `Rect` that should be passed to `Popup::render()`
    pub(super) fn size(&self) -> Size {
        let text_width = self
            .lines
            .iter()
            .map(Line::width)
            .chain(std::iter::once(self.title.len()))
            .max()
            .unwrap_or_default();
        Size {
            width: u16::try_from(text_width)
                .unwrap_or(u16::MAX)
                .saturating_add(4),
            height: u16::try_from(self.lines.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2),
        }
    }
}

impl Widget for Popup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines.into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }
    }
}

fn key_hint(key: &'static str, action: &str) -> Line<'static> {
    Line::from_iter([
        Span::raw("Press "),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(format!(" to {action}")),
    ])
}
