//! Main application state

use dice_core::{GameSession, GameSnapshot, MatchConfig, PlayerId, Settings};
use tokio::sync::watch;

use crate::ui::theme::GameTheme;
use crate::ui::Overlay;

/// Which settings field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    FirstName,
    SecondName,
    Target,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [
        SettingsField::FirstName,
        SettingsField::SecondName,
        SettingsField::Target,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::FirstName => "Player 1 Name",
            SettingsField::SecondName => "Player 2 Name",
            SettingsField::Target => "Target Score",
        }
    }

    fn index(self) -> usize {
        match self {
            SettingsField::FirstName => 0,
            SettingsField::SecondName => 1,
            SettingsField::Target => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Editable copy of the match settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    values: [String; 3],
    pub focused: SettingsField,
}

impl SettingsForm {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            values: [
                config.name(PlayerId::First).to_string(),
                config.name(PlayerId::Second).to_string(),
                config.target_score.to_string(),
            ],
            focused: SettingsField::default(),
        }
    }

    pub fn value(&self, field: SettingsField) -> &str {
        &self.values[field.index()]
    }

    pub fn insert_char(&mut self, c: char) {
        self.values[self.focused.index()].push(c);
    }

    pub fn delete_char(&mut self) {
        self.values[self.focused.index()].pop();
    }

    pub fn to_settings(&self) -> Settings {
        Settings::new()
            .with_player_names(
                self.value(SettingsField::FirstName),
                self.value(SettingsField::SecondName),
            )
            .with_target_text(self.value(SettingsField::Target))
    }
}

/// Main application state
pub struct App {
    pub session: GameSession,
    updates: watch::Receiver<GameSnapshot>,

    // Latest state for rendering
    pub snapshot: GameSnapshot,

    // UI state
    pub theme: GameTheme,
    overlay: Option<Overlay>,
    status_message: Option<String>,

    // Animation
    pub animation_frame: u8,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        let updates = session.subscribe();
        let snapshot = updates.borrow().clone();
        Self {
            session,
            updates,
            snapshot,
            theme: GameTheme::default(),
            overlay: None,
            status_message: None,
            animation_frame: 0,
        }
    }

    /// Pull the latest snapshot from the session
    pub fn refresh(&mut self) {
        if self.updates.has_changed().unwrap_or(false) {
            self.snapshot = self.updates.borrow_and_update().clone();
        }
    }

    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    // === Overlays ===

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlay.as_mut()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = Some(overlay);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            Some(Overlay::Help) => None,
            _ => Some(Overlay::Help),
        };
    }

    /// Open settings pre-filled from the current configuration
    pub async fn open_settings(&mut self) {
        let config = self.session.config().await;
        self.set_overlay(Overlay::Settings(SettingsForm::from_config(&config)));
    }

    // === Status ===

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
