//! TUI widgets for the dice game

pub mod die;
pub mod player_panel;
pub mod status_bar;

pub use die::DieWidget;
pub use player_panel::PlayerPanelWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
