//! Drawing a [`Snapshot`] of the game in the terminal
mod board;
mod panel;
mod popup;
use self::board::Board;
use self::panel::Panel;
use self::popup::Popup;
use crate::consts;
use crate::engine::{FoodType, Snapshot};
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Color,
    widgets::Widget,
};

impl Widget for &Snapshot {
    /*
     * ┌───────────────────────────────────┐  Score:      0
     * │                                   │  High Score: 40
     * │                                   │  Speed:      Medium
     * │                 ▄                 │  Time:       0:00
     * │      ▀                            │
     * │                                   │  Food
     * ⋮                                   ⋮  ...
     */
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let board_size = Board::size(self.grid);
        let [board_area, panel_area] = Layout::horizontal([
            Constraint::Length(board_size.width),
            Constraint::Fill(1),
        ])
        .spacing(consts::PANEL_GAP)
        .areas(display);
        let board_area = center_rect(board_area, board_size);
        Board::new(self).render(board_area, buf);
        Panel::new(self).render(panel_area, buf);
        if let Some(popup) = Popup::for_snapshot(self) {
            let popup_area = center_rect(board_area, popup.size());
            popup.render(popup_area, buf);
        }
    }
}

/// The colour in which to draw food of the given type
fn food_color(kind: FoodType) -> Color {
    match kind {
        FoodType::Regular => consts::REGULAR_FOOD_COLOR,
        FoodType::Bonus => consts::BONUS_FOOD_COLOR,
        FoodType::Super => consts::SUPER_FOOD_COLOR,
    }
}
