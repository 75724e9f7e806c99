//! Die face display widget

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use dice_core::DieFace;

use crate::ui::theme::GameTheme;

/// Pip rows for each face, three columns per row
fn pips(face: DieFace) -> [&'static str; 3] {
    match face.value() {
        1 => ["       ", "   o   ", "       "],
        2 => [" o     ", "       ", "     o "],
        3 => [" o     ", "   o   ", "     o "],
        4 => [" o   o ", "       ", " o   o "],
        5 => [" o   o ", "   o   ", " o   o "],
        _ => [" o   o ", " o   o ", " o   o "],
    }
}

/// Widget showing the die, with a spinner while a roll is in flight
pub struct DieWidget<'a> {
    face: DieFace,
    rolling: bool,
    frame: u8,
    caption: Option<Line<'a>>,
    theme: &'a GameTheme,
}

impl<'a> DieWidget<'a> {
    pub fn new(face: DieFace, theme: &'a GameTheme) -> Self {
        Self {
            face,
            rolling: false,
            frame: 0,
            caption: None,
            theme,
        }
    }

    pub fn rolling(mut self, rolling: bool, frame: u8) -> Self {
        self.rolling = rolling;
        self.frame = frame;
        self
    }

    pub fn caption(mut self, caption: Line<'a>) -> Self {
        self.caption = Some(caption);
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let style = self.theme.die_style(self.rolling, self.face.is_bust());
        let mut lines = vec![Line::from(Span::styled("╭───────╮", style))];
        for row in pips(self.face) {
            lines.push(Line::from(Span::styled(format!("│{row}│"), style)));
        }
        lines.push(Line::from(Span::styled("╰───────╯", style)));
        lines.push(Line::from(""));

        if self.rolling {
            let spin_chars = ['|', '/', '-', '\\'];
            let spin = spin_chars[(self.frame as usize) % 4];
            lines.push(Line::from(Span::styled(
                format!("{spin} Rolling... {spin}"),
                Style::default().add_modifier(Modifier::DIM),
            )));
        } else if let Some(caption) = &self.caption {
            lines.push(caption.clone());
        }
        lines
    }
}

impl Widget for DieWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Die ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.rolling));

        let inner = block.inner(area);
        block.render(area, buf);

        // Push the die towards the vertical middle
        let top_padding = inner.height.saturating_sub(7) / 2;
        let mut lines: Vec<Line> = (0..top_padding).map(|_| Line::from("")).collect();
        lines.extend(self.lines());

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(value: u8) -> DieFace {
        DieFace::new(value).unwrap()
    }

    #[test]
    fn test_pip_count_matches_face() {
        for value in 1..=DieFace::SIDES {
            let count: usize = pips(face(value))
                .iter()
                .map(|row| row.matches('o').count())
                .sum();
            assert_eq!(count, value as usize);
        }
    }

    #[test]
    fn test_rolling_shows_spinner() {
        let theme = GameTheme::default();
        let widget = DieWidget::new(face(3), &theme).rolling(true, 1);
        let text: Vec<String> = widget.lines().iter().map(|l| l.to_string()).collect();
        assert!(text.last().unwrap().contains("/ Rolling..."));
    }
}
