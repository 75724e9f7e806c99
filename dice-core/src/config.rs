//! Match configuration, settings updates, and roll timing.
//!
//! `MatchConfig` is the validated configuration the engine plays by.
//! `Settings` is a partial update from the outside world; applying it never
//! leaves the config in an invalid state. Rejected fields keep their
//! previous value.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::player::PlayerId;

/// Environment variable for the target score.
pub const ENV_TARGET_SCORE: &str = "DICE_TARGET_SCORE";
/// Environment variable for the first player's name.
pub const ENV_PLAYER_ONE: &str = "DICE_PLAYER_ONE";
/// Environment variable for the second player's name.
pub const ENV_PLAYER_TWO: &str = "DICE_PLAYER_TWO";
/// Environment variable for the roll duration in milliseconds.
pub const ENV_ROLL_MS: &str = "DICE_ROLL_MS";
/// Environment variable for the flicker interval in milliseconds (0 disables).
pub const ENV_TICK_MS: &str = "DICE_TICK_MS";

/// Errors from configuration input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid target score: {0:?} (expected a positive whole number)")]
    InvalidTargetScore(String),

    #[error("Name for {0} cannot be blank")]
    EmptyPlayerName(PlayerId),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

/// Validated match configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Total a player must reach to win.
    pub target_score: u32,
    pub player_names: [String; 2],
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            target_score: Self::DEFAULT_TARGET,
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
        }
    }
}

impl MatchConfig {
    pub const DEFAULT_TARGET: u32 = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target score. Zero is ignored.
    pub fn with_target_score(mut self, target: u32) -> Self {
        if target > 0 {
            self.target_score = target;
        }
        self
    }

    /// Set one player's name. Blank names are ignored.
    pub fn with_player_name(mut self, player: PlayerId, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        if !name.is_empty() {
            self.player_names[player.index()] = name.to_string();
        }
        self
    }

    pub fn name(&self, player: PlayerId) -> &str {
        &self.player_names[player.index()]
    }

    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::new();
        if let Some(name) = lookup(ENV_PLAYER_ONE) {
            settings = settings.with_player_name(PlayerId::First, name);
        }
        if let Some(name) = lookup(ENV_PLAYER_TWO) {
            settings = settings.with_player_name(PlayerId::Second, name);
        }
        if let Some(target) = lookup(ENV_TARGET_SCORE) {
            settings = settings.with_target_text(target);
        }

        let mut config = Self::default();
        config.apply(&settings).map_err(|e| match e {
            ConfigError::InvalidTargetScore(value) => ConfigError::InvalidEnv {
                key: ENV_TARGET_SCORE.to_string(),
                value,
            },
            ConfigError::EmptyPlayerName(player) => ConfigError::InvalidEnv {
                key: match player {
                    PlayerId::First => ENV_PLAYER_ONE,
                    PlayerId::Second => ENV_PLAYER_TWO,
                }
                .to_string(),
                value: String::new(),
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Apply a settings update.
    ///
    /// Every valid field is applied. Invalid fields keep their previous value
    /// and the first rejection is returned.
    pub fn apply(&mut self, settings: &Settings) -> Result<(), ConfigError> {
        let mut first_error = None;

        for player in PlayerId::ALL {
            if let Some(name) = &settings.player_names[player.index()] {
                let name = name.trim();
                if name.is_empty() {
                    first_error.get_or_insert(ConfigError::EmptyPlayerName(player));
                } else {
                    self.player_names[player.index()] = name.to_string();
                }
            }
        }

        if let Some(target) = &settings.target_score {
            match target.resolve() {
                Ok(value) => self.target_score = value,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Raw target score as it arrived from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetInput {
    Number(i64),
    Text(String),
}

impl TargetInput {
    fn resolve(&self) -> Result<u32, ConfigError> {
        let (value, raw) = match self {
            TargetInput::Number(n) => (Some(*n), n.to_string()),
            TargetInput::Text(text) => (text.trim().parse::<i64>().ok(), text.clone()),
        };
        value
            .filter(|v| *v > 0)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(ConfigError::InvalidTargetScore(raw))
    }
}

/// A partial configuration update.
///
/// ```
/// use dice_core::{PlayerId, Settings};
///
/// let settings = Settings::new()
///     .with_player_name(PlayerId::First, "Ada")
///     .with_target_text("100");
/// assert!(!settings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    player_names: [Option<String>; 2],
    target_score: Option<TargetInput>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player_name(mut self, player: PlayerId, name: impl Into<String>) -> Self {
        self.player_names[player.index()] = Some(name.into());
        self
    }

    pub fn with_player_names(self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.with_player_name(PlayerId::First, first)
            .with_player_name(PlayerId::Second, second)
    }

    pub fn with_target_score(mut self, target: i64) -> Self {
        self.target_score = Some(TargetInput::Number(target));
        self
    }

    /// Target score as typed by a user; parsed when applied.
    pub fn with_target_text(mut self, target: impl Into<String>) -> Self {
        self.target_score = Some(TargetInput::Text(target.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.player_names.iter().all(Option::is_none) && self.target_score.is_none()
    }
}

/// How long a roll takes and how often the transient face changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTiming {
    /// Delay before the authoritative face is drawn.
    pub duration: Duration,
    /// Interval between transient faces. `None` disables them.
    pub tick: Option<Duration>,
}

impl Default for RollTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            tick: Some(Duration::from_millis(100)),
        }
    }
}

impl RollTiming {
    /// Resolve immediately with no transient faces.
    pub fn instant() -> Self {
        Self {
            duration: Duration::ZERO,
            tick: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the flicker interval; a zero interval disables flicker.
    pub fn with_tick(mut self, tick: Option<Duration>) -> Self {
        self.tick = tick.filter(|t| !t.is_zero());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut timing = Self::default();
        if let Some(ms) = parse_millis(&lookup, ENV_ROLL_MS)? {
            timing = timing.with_duration(ms);
        }
        if let Some(ms) = parse_millis(&lookup, ENV_TICK_MS)? {
            timing = timing.with_tick(Some(ms));
        }
        Ok(timing)
    }
}

fn parse_millis<F>(lookup: &F, key: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            }),
    }
}
