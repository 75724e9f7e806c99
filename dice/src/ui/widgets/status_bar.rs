//! Hotkey and status bars

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use dice_core::{Action, GameSnapshot};

use crate::ui::theme::GameTheme;

/// One-line list of the keys that currently do something
pub struct HotkeyBarWidget<'a> {
    snapshot: &'a GameSnapshot,
    theme: &'a GameTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(snapshot: &'a GameSnapshot, theme: &'a GameTheme) -> Self {
        Self { snapshot, theme }
    }

    fn enabled(&self, action: Action) -> bool {
        if !self.snapshot.in_progress {
            action.allowed_after_game_over()
        } else {
            action == Action::Reset || !self.snapshot.is_rolling
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for action in Action::ALL {
            let enabled = self.enabled(action);
            spans.push(Span::styled(format!(" {} ", action.key()), self.theme.key_style(enabled)));
            spans.push(Span::styled(
                format!("{}  ", action.label()),
                if enabled {
                    self.theme.text_style()
                } else {
                    self.theme.system_style()
                },
            ));
        }
        for (key, label) in [("s", "Settings"), ("?", "Help"), ("q", "Quit")] {
            spans.push(Span::styled(format!(" {key} "), self.theme.key_style(true)));
            spans.push(Span::styled(format!("{label}  "), self.theme.text_style()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Bordered bar describing whose turn it is, or the latest message
pub struct StatusBarWidget<'a> {
    snapshot: &'a GameSnapshot,
    message: Option<&'a str>,
    theme: &'a GameTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(snapshot: &'a GameSnapshot, theme: &'a GameTheme) -> Self {
        Self {
            snapshot,
            message: None,
            theme,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    fn text(&self) -> String {
        if let Some(message) = self.message {
            return message.to_string();
        }
        let snap = self.snapshot;
        match snap.winner {
            Some(winner) => format!(
                "{} wins with {}! Press n for a new game.",
                snap.player(winner).name,
                snap.player(winner).total
            ),
            None if snap.is_rolling => format!("{} is rolling...", snap.active().name),
            None => format!(
                "{}'s turn. Turn score {}. First to {} wins.",
                snap.active().name,
                snap.current_score,
                snap.target_score
            ),
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));

        let style = if self.snapshot.winner.is_some() {
            self.theme.player_name_style(false, true)
        } else {
            self.theme.text_style()
        };

        Paragraph::new(Line::from(Span::styled(self.text(), style)))
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::{GameEngine, MatchConfig, ScriptedRoller};

    #[test]
    fn test_status_text_follows_game() {
        let theme = GameTheme::default();
        let mut engine = GameEngine::with_roller(
            MatchConfig::default().with_target_score(5),
            ScriptedRoller::from_values(&[6]),
        );

        let snap = engine.snapshot();
        let text = StatusBarWidget::new(&snap, &theme).text();
        assert_eq!(text, "Player 1's turn. Turn score 0. First to 5 wins.");

        engine.roll_now();
        engine.hold();
        let snap = engine.snapshot();
        let text = StatusBarWidget::new(&snap, &theme).text();
        assert!(text.starts_with("Player 1 wins with 6"));

        let text = StatusBarWidget::new(&snap, &theme).message(Some("Saved")).text();
        assert_eq!(text, "Saved");
    }

    #[test]
    fn test_hotkeys_disabled_after_game_over() {
        let theme = GameTheme::default();
        let mut engine = GameEngine::with_roller(
            MatchConfig::default().with_target_score(5),
            ScriptedRoller::from_values(&[6]),
        );
        engine.roll_now();
        engine.hold();
        let snap = engine.snapshot();
        let bar = HotkeyBarWidget::new(&snap, &theme);
        assert!(!bar.enabled(Action::Roll));
        assert!(!bar.enabled(Action::Hold));
        assert!(bar.enabled(Action::Reset));
    }

    #[test]
    fn test_only_reset_enabled_while_rolling() {
        let theme = GameTheme::default();
        let mut engine = GameEngine::with_roller(MatchConfig::default(), ScriptedRoller::from_values(&[3]));
        engine.roll();
        let snap = engine.snapshot();
        let bar = HotkeyBarWidget::new(&snap, &theme);
        assert!(!bar.enabled(Action::Roll));
        assert!(!bar.enabled(Action::Hold));
        assert!(bar.enabled(Action::Reset));
    }
}
