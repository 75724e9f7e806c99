//! Color theme and styling for the dice TUI

use ratatui::style::{Color, Modifier, Style};

/// Game UI color theme
#[derive(Debug, Clone)]
pub struct GameTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Turn colors
    pub active_player: Color,
    pub winner: Color,
    pub turn_score: Color,

    // Die colors
    pub die_face: Color,
    pub die_rolling: Color,
    pub bust: Color,

    // Progress gauge colors
    pub progress_low: Color,
    pub progress_mid: Color,
    pub progress_high: Color,

    // Text colors
    pub key_hint: Color,
    pub system_text: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            active_player: Color::LightGreen,
            winner: Color::Yellow,
            turn_score: Color::LightCyan,

            die_face: Color::White,
            die_rolling: Color::DarkGray,
            bust: Color::Red,

            progress_low: Color::Blue,
            progress_mid: Color::Cyan,
            progress_high: Color::Green,

            key_hint: Color::Yellow,
            system_text: Color::DarkGray,
        }
    }
}

impl GameTheme {
    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get style for a player's name
    pub fn player_name_style(&self, is_active: bool, is_winner: bool) -> Style {
        if is_winner {
            Style::default()
                .fg(self.winner)
                .add_modifier(Modifier::BOLD)
        } else if is_active {
            Style::default()
                .fg(self.active_player)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.foreground)
        }
    }

    /// Get style for the unbanked turn score
    pub fn turn_score_style(&self) -> Style {
        Style::default()
            .fg(self.turn_score)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for the die
    pub fn die_style(&self, rolling: bool, bust: bool) -> Style {
        if rolling {
            Style::default().fg(self.die_rolling)
        } else if bust {
            Style::default().fg(self.bust).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.die_face)
                .add_modifier(Modifier::BOLD)
        }
    }

    /// Get gauge color based on percent of the target banked
    pub fn progress_color(&self, percent: u8) -> Color {
        if percent >= 75 {
            self.progress_high
        } else if percent >= 40 {
            self.progress_mid
        } else {
            self.progress_low
        }
    }

    /// Get style for a hotkey label
    pub fn key_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.key_hint)
                .add_modifier(Modifier::BOLD)
        } else {
            self.system_style()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_color_thresholds() {
        let theme = GameTheme::default();
        assert_eq!(theme.progress_color(0), theme.progress_low);
        assert_eq!(theme.progress_color(50), theme.progress_mid);
        assert_eq!(theme.progress_color(100), theme.progress_high);
    }
}
