//! Player panel widget: name, banked total, progress and recent rolls

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use dice_core::PlayerView;

use crate::ui::theme::GameTheme;

/// Rolls shown in the panel, newest last
const RECENT_ROLLS: usize = 8;

pub struct PlayerPanelWidget<'a> {
    player: &'a PlayerView,
    turn_score: u32,
    active: bool,
    winner: bool,
    theme: &'a GameTheme,
}

impl<'a> PlayerPanelWidget<'a> {
    pub fn new(player: &'a PlayerView, theme: &'a GameTheme) -> Self {
        Self {
            player,
            turn_score: 0,
            active: false,
            winner: false,
            theme,
        }
    }

    pub fn turn_score(mut self, turn_score: u32) -> Self {
        self.turn_score = turn_score;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn winner(mut self, winner: bool) -> Self {
        self.winner = winner;
        self
    }

    fn recent_rolls(&self) -> String {
        let rolls: Vec<String> = self
            .player
            .recent(RECENT_ROLLS)
            .iter()
            .map(|face| face.to_string())
            .collect();
        if rolls.is_empty() {
            "-".to_string()
        } else {
            rolls.join(" ")
        }
    }
}

impl Widget for PlayerPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.winner {
            format!(" ★ {} ★ ", self.player.name)
        } else if self.active {
            format!(" ▶ {} ", self.player.name)
        } else {
            format!(" {} ", self.player.name)
        };

        let block = Block::default()
            .title(Span::styled(
                title,
                self.theme.player_name_style(self.active, self.winner),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.active));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Total
                Constraint::Length(2), // Progress
                Constraint::Length(2), // Current turn
                Constraint::Min(0),    // Recent rolls
            ])
            .split(inner);

        let total = Line::from(vec![
            Span::raw("Total: "),
            Span::styled(
                self.player.total.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(total).render(chunks[0], buf);

        let progress = self.player.progress.min(100);
        Gauge::default()
            .gauge_style(Style::default().fg(self.theme.progress_color(progress)))
            .percent(u16::from(progress))
            .label(format!("{progress}%"))
            .render(chunks[1], buf);

        let current = Line::from(vec![
            Span::raw("Current: "),
            Span::styled(self.turn_score.to_string(), self.theme.turn_score_style()),
        ]);
        Paragraph::new(current).render(chunks[2], buf);

        let rolls = vec![
            Line::from(Span::styled(
                "Recent rolls",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(self.recent_rolls()),
        ];
        Paragraph::new(rolls).render(chunks[3], buf);
    }
}
