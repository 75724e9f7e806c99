//! Render orchestration for the dice TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use dice_core::{GameSnapshot, PlayerId};

use crate::app::{App, SettingsField, SettingsForm};
use crate::ui::layout::{centered_rect_fixed, TableLayout};
use crate::ui::widgets::{DieWidget, HotkeyBarWidget, PlayerPanelWidget, StatusBarWidget};

/// Overlay types
#[derive(Debug, Clone)]
pub enum Overlay {
    Help,
    Settings(SettingsForm),
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = TableLayout::calculate(area);
    let snapshot = &app.snapshot;

    render_title_bar(frame, snapshot, layout.title_area);

    for (id, panel_area) in [
        (PlayerId::First, layout.first_player),
        (PlayerId::Second, layout.second_player),
    ] {
        let panel = PlayerPanelWidget::new(snapshot.player(id), &app.theme)
            .turn_score(snapshot.turn_score_for(id))
            .active(snapshot.in_progress && id == snapshot.active_player)
            .winner(snapshot.winner == Some(id));
        frame.render_widget(panel, panel_area);
    }

    render_die(frame, app, layout.centre);

    frame.render_widget(HotkeyBarWidget::new(snapshot, &app.theme), layout.hotkey_bar);
    frame.render_widget(
        StatusBarWidget::new(snapshot, &app.theme).message(app.status_message()),
        layout.status_bar,
    );

    if let Some(overlay) = app.overlay() {
        render_overlay(frame, app, overlay, area);
    }
}

/// Render the title bar
fn render_title_bar(frame: &mut Frame, snapshot: &GameSnapshot, area: Rect) {
    let title = format!(
        " Dice Masters | {} vs {} | First to {} ",
        snapshot.players[0].name, snapshot.players[1].name, snapshot.target_score
    );

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the die in the centre column
fn render_die(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = &app.snapshot;
    let caption = match snapshot.winner {
        Some(winner) => Line::from(Span::styled(
            format!("{} wins!", snapshot.player(winner).name),
            app.theme.player_name_style(false, true),
        )),
        None => match snapshot.busted {
            Some(player) => Line::from(Span::styled(
                format!("{} busted!", snapshot.player(player).name),
                app.theme.die_style(false, true),
            )),
            None => Line::from(vec![
                Span::raw("Turn: "),
                Span::styled(snapshot.current_score.to_string(), app.theme.turn_score_style()),
            ]),
        },
    };

    let die = DieWidget::new(snapshot.face_shown, &app.theme)
        .rolling(snapshot.is_rolling, app.animation_frame)
        .caption(caption);
    frame.render_widget(die, area);
}

/// Render overlay
fn render_overlay(frame: &mut Frame, app: &App, overlay: &Overlay, area: Rect) {
    match overlay {
        Overlay::Help => render_help_overlay(frame, app, area),
        Overlay::Settings(form) => render_settings_overlay(frame, app, form, area),
    }
}

/// Help text; the rules line names the current target
fn help_lines(target: u32) -> Vec<Line<'static>> {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))
    };

    vec![
        Line::from(Span::styled(
            " Dice Masters - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Rules:"),
        Line::from("  Each player rolls the dice."),
        Line::from("  Rolling 1 resets turn score."),
        Line::from("  Hold to save points."),
        Line::from(format!("  Reach {target} to win.")),
        Line::from(""),
        heading("Keys:"),
        Line::from("  r       Roll the die"),
        Line::from("  h       Hold (bank turn score)"),
        Line::from("  n       New game"),
        Line::from("  s       Settings"),
        Line::from("  ?       Toggle this help"),
        Line::from("  q       Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ]
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(44, 20, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_lines(app.snapshot.target_score))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Render settings overlay
fn render_settings_overlay(frame: &mut Frame, app: &App, form: &SettingsForm, area: Rect) {
    let popup_area = centered_rect_fixed(48, 13, area);

    frame.render_widget(Clear, popup_area);

    let mut lines = vec![Line::from("")];
    for field in SettingsField::ALL {
        let focused = field == form.focused;
        let marker = if focused { "▶" } else { " " };
        let value_style = if focused {
            Style::default()
                .fg(app.theme.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            app.theme.text_style()
        };
        let cursor = if focused { "_" } else { "" };

        lines.push(Line::from(vec![
            Span::raw(format!(" {marker} {:<14}", field.label())),
            Span::styled(format!("{}{cursor}", form.value(field)), value_style),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Enter save + new game   Ctrl-D defaults",
        app.theme.system_style(),
    )));
    lines.push(Line::from(Span::styled(
        " Tab next field          Esc cancel",
        app.theme.system_style(),
    )));

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::{GameEngine, GameSession, MatchConfig, RollTiming, ScriptedRoller};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_help_mentions_target() {
        let text: Vec<String> = help_lines(75).iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("Reach 75 to win.")));
        assert!(text.iter().any(|l| l.contains("Rolling 1 resets turn score.")));
    }

    #[tokio::test]
    async fn test_render_table_and_overlays() {
        let session = GameSession::new(
            MatchConfig::default().with_player_name(PlayerId::Second, "Grace"),
            RollTiming::instant(),
        );
        let mut app = App::new(session);

        let text = screen_text(&app);
        assert!(text.contains("Dice Masters"));
        assert!(text.contains("Player 1"));
        assert!(text.contains("Grace"));
        assert!(text.contains("First to 50"));

        app.toggle_help();
        assert!(screen_text(&app).contains("Reach 50 to win."));

        app.open_settings().await;
        let text = screen_text(&app);
        assert!(text.contains("Target Score"));
        assert!(text.contains("Grace"));
    }

    #[tokio::test]
    async fn test_bust_caption_clears_on_hold() {
        let engine = GameEngine::with_roller(MatchConfig::default(), ScriptedRoller::from_values(&[1]));
        let session = GameSession::with_engine(engine, RollTiming::instant());
        let mut app = App::new(session.clone());

        session.roll().await;
        session.wait_idle().await;
        app.refresh();
        assert!(screen_text(&app).contains("Player 1 busted!"));

        // Player 2 holds on zero; the die still shows the 1.
        session.hold().await;
        app.refresh();
        assert_eq!(app.snapshot.face_shown.value(), 1);
        let text = screen_text(&app);
        assert!(!text.contains("busted"));
        assert!(text.contains("Turn: 0"));
    }
}
