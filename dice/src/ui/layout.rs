//! Screen layout for the dice TUI

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Areas of the main table screen
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    pub title_area: Rect,
    pub first_player: Rect,
    pub centre: Rect,
    pub second_player: Rect,
    pub hotkey_bar: Rect,
    pub status_bar: Rect,
}

impl TableLayout {
    /// Title on top, three columns in the middle, bars at the bottom
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(12),   // Table
                Constraint::Length(1), // Hotkeys
                Constraint::Length(3), // Status
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(30),
                Constraint::Percentage(35),
            ])
            .split(rows[1]);

        Self {
            title_area: rows[0],
            first_player: columns[0],
            centre: columns[1],
            second_player: columns[2],
            hotkey_bar: rows[2],
            status_bar: rows[3],
        }
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
