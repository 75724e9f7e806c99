//! Event handling for the dice TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use dice_core::{Action, Settings};

use crate::app::App;
use crate::ui::Overlay;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// A game action to send to the session
    Action(Action),
    OpenSettings,
    /// Apply these settings and start a new game
    SaveSettings(Settings),
    /// Restore default settings and start a new game
    RestoreDefaults,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('s') => EventResult::OpenSettings,
        KeyCode::Char(c) => match Action::from_key(c) {
            Some(action) => EventResult::Action(action),
            None => EventResult::Continue,
        },
        _ => EventResult::Continue,
    }
}

/// Handle keys while an overlay is open
fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    let Some(overlay) = app.overlay_mut() else {
        return EventResult::Continue;
    };

    match overlay {
        Overlay::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_overlay();
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        },
        Overlay::Settings(form) => match key.code {
            KeyCode::Esc => {
                app.close_overlay();
                EventResult::NeedsRedraw
            }
            KeyCode::Enter => EventResult::SaveSettings(form.to_settings()),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                EventResult::RestoreDefaults
            }
            KeyCode::Tab | KeyCode::Down => {
                form.focused = form.focused.next();
                EventResult::NeedsRedraw
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focused = form.focused.previous();
                EventResult::NeedsRedraw
            }
            KeyCode::Backspace => {
                form.delete_char();
                EventResult::NeedsRedraw
            }
            KeyCode::Char(c) => {
                form.insert_char(c);
                EventResult::NeedsRedraw
            }
            _ => EventResult::Continue,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{SettingsField, SettingsForm};
    use dice_core::{GameSession, MatchConfig, RollTiming};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new(GameSession::new(MatchConfig::default(), RollTiming::instant()))
    }

    #[test]
    fn test_game_keys_map_to_actions() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('r'))), EventResult::Action(Action::Roll));
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('h'))), EventResult::Action(Action::Hold));
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('n'))), EventResult::Action(Action::Reset));
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('s'))), EventResult::OpenSettings);
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);
    }

    #[test]
    fn test_help_overlay_swallows_game_keys() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.has_overlay());
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('r'))), EventResult::Continue);
        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_settings_overlay_edits_and_saves() {
        let mut app = app();
        app.set_overlay(Overlay::Settings(SettingsForm::from_config(&MatchConfig::default())));

        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Backspace));
        handle_event(&mut app, key(KeyCode::Backspace));
        handle_event(&mut app, key(KeyCode::Char('2')));
        handle_event(&mut app, key(KeyCode::Char('0')));

        match app.overlay() {
            Some(Overlay::Settings(form)) => {
                assert_eq!(form.focused, SettingsField::Target);
                assert_eq!(form.value(SettingsField::Target), "20");
            }
            other => panic!("expected settings overlay, got {other:?}"),
        }

        let expected = Settings::new()
            .with_player_names("Player 1", "Player 2")
            .with_target_text("20");
        assert_eq!(
            handle_event(&mut app, key(KeyCode::Enter)),
            EventResult::SaveSettings(expected)
        );
    }
}
