//! The turn and scoring state machine.
//!
//! `GameEngine` owns every piece of match state and is the only thing that
//! mutates it. Rolls are two-step: `roll()` moves the engine into
//! `TurnPhase::Rolling` and hands back a `RollTicket`; `resolve_roll()` later
//! draws the authoritative face for that ticket. The gap between the two is
//! where a host plays its rolling animation (see `session::GameSession`).
//!
//! Operations whose preconditions do not hold (rolling twice, holding
//! mid-roll, acting after the game is over) are ignored and return `None`.
//!
//! ```
//! use dice_core::{GameEngine, MatchConfig};
//!
//! let mut engine = GameEngine::new(MatchConfig::default());
//! let ticket = engine.roll().unwrap();
//! assert!(engine.is_rolling());
//! assert!(engine.roll().is_none());
//!
//! engine.resolve_roll(ticket);
//! assert!(!engine.is_rolling());
//! assert_eq!(engine.player(ticket.player).history().len(), 1);
//! ```

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::config::{ConfigError, MatchConfig, Settings};
use crate::dice::{DieFace, DieRoller, RandomRoller};
use crate::player::{Player, PlayerId, Players};
use crate::snapshot::{GameSnapshot, PlayerView};

/// Where the engine is in a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the active player to roll or hold.
    Idle,
    /// A roll is in flight and has not been resolved yet.
    Rolling { generation: u64 },
    /// Terminal until `reset()`.
    GameOver { winner: PlayerId },
}

/// Handle for a roll in flight.
///
/// A ticket only resolves the roll that issued it; tickets from before a
/// `reset()` are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTicket {
    pub generation: u64,
    pub player: PlayerId,
}

/// Something that happened to the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    RollStarted {
        player: PlayerId,
    },
    Rolled {
        player: PlayerId,
        face: DieFace,
        turn_score: u32,
    },
    /// A 1 was rolled; the turn score is lost.
    Busted {
        player: PlayerId,
        next: PlayerId,
    },
    Held {
        player: PlayerId,
        banked: u32,
        total: u32,
        next: PlayerId,
    },
    Won {
        player: PlayerId,
        total: u32,
    },
    Reset,
    Configured,
}

/// The game engine.
pub struct GameEngine {
    config: MatchConfig,
    players: Players,
    active: PlayerId,
    current_score: u32,
    face_shown: DieFace,
    phase: TurnPhase,
    busted: Option<PlayerId>,
    generation: u64,
    roller: Box<dyn DieRoller>,
    flicker_rng: StdRng,
}

impl GameEngine {
    /// New match with a uniformly random die.
    pub fn new(config: MatchConfig) -> Self {
        Self::with_roller(config, RandomRoller::new())
    }

    /// New match drawing authoritative faces from `roller`.
    pub fn with_roller(config: MatchConfig, roller: impl DieRoller + 'static) -> Self {
        let players = Players::new(&config.player_names);
        Self {
            config,
            players,
            active: PlayerId::First,
            current_score: 0,
            face_shown: DieFace::ONE,
            phase: TurnPhase::Idle,
            busted: None,
            generation: 0,
            roller: Box::new(roller),
            flicker_rng: StdRng::from_entropy(),
        }
    }

    // === Commands ===

    /// Start a roll for the active player.
    ///
    /// Returns `None` while a roll is already in flight or after the game
    /// is over.
    pub fn roll(&mut self) -> Option<RollTicket> {
        if self.phase != TurnPhase::Idle {
            debug!("roll ignored in phase {:?}", self.phase);
            return None;
        }

        self.generation += 1;
        self.busted = None;
        self.phase = TurnPhase::Rolling {
            generation: self.generation,
        };
        debug!("{} starts roll #{}", self.active, self.generation);

        Some(RollTicket {
            generation: self.generation,
            player: self.active,
        })
    }

    /// Show a transient face while `ticket` is in flight.
    ///
    /// Has no effect on scoring or history.
    pub fn flicker(&mut self, ticket: RollTicket) -> Option<DieFace> {
        if !self.is_current(ticket) {
            return None;
        }
        self.face_shown = DieFace::random(&mut self.flicker_rng);
        Some(self.face_shown)
    }

    /// Draw the final face for `ticket` and apply it.
    pub fn resolve_roll(&mut self, ticket: RollTicket) -> Option<GameEvent> {
        if !self.is_current(ticket) {
            debug!("stale roll #{} ignored", ticket.generation);
            return None;
        }

        let face = self.roller.roll();
        let player = self.active;
        self.face_shown = face;
        self.phase = TurnPhase::Idle;
        self.players[player].record_roll(face);

        if face.is_bust() {
            let lost = self.current_score;
            self.busted = Some(player);
            self.end_turn();
            debug!("{player} rolled 1 and loses {lost} points");
            Some(GameEvent::Busted {
                player,
                next: self.active,
            })
        } else {
            self.current_score = self.current_score.saturating_add(u32::from(face));
            debug!("{player} rolled {face}, turn score {}", self.current_score);
            Some(GameEvent::Rolled {
                player,
                face,
                turn_score: self.current_score,
            })
        }
    }

    /// Roll and resolve in one step.
    pub fn roll_now(&mut self) -> Option<GameEvent> {
        let ticket = self.roll()?;
        self.resolve_roll(ticket)
    }

    /// Bank the turn score for the active player.
    pub fn hold(&mut self) -> Option<GameEvent> {
        if self.phase != TurnPhase::Idle {
            debug!("hold ignored in phase {:?}", self.phase);
            return None;
        }

        let player = self.active;
        self.busted = None;
        let banked = std::mem::take(&mut self.current_score);
        let total = self.players[player].bank(banked);

        if total >= self.config.target_score {
            self.phase = TurnPhase::GameOver { winner: player };
            info!("{player} wins with {total} (target {})", self.config.target_score);
            Some(GameEvent::Won { player, total })
        } else {
            self.end_turn();
            info!("{player} banks {banked}, total {total}");
            Some(GameEvent::Held {
                player,
                banked,
                total,
                next: self.active,
            })
        }
    }

    /// Start a fresh match with the current configuration.
    ///
    /// Valid from any phase. Any roll in flight becomes stale.
    pub fn reset(&mut self) -> GameEvent {
        for player in self.players.iter_mut() {
            player.clear();
        }
        self.active = PlayerId::First;
        self.current_score = 0;
        self.face_shown = DieFace::ONE;
        self.phase = TurnPhase::Idle;
        self.busted = None;
        self.generation += 1;
        info!("new match, target {}", self.config.target_score);
        GameEvent::Reset
    }

    /// Update names and/or the target score.
    ///
    /// Scores are untouched; callers that want a fresh match call `reset()`
    /// afterwards. Rejected fields keep their previous value.
    pub fn configure(&mut self, settings: &Settings) -> Result<(), ConfigError> {
        let result = self.config.apply(settings);
        self.sync_names();
        match &result {
            Ok(()) => info!(
                "configured: {} vs {}, target {}",
                self.config.name(PlayerId::First),
                self.config.name(PlayerId::Second),
                self.config.target_score
            ),
            Err(e) => warn!("configuration rejected: {e}"),
        }
        result
    }

    /// Put the default names and target back. Scores are untouched.
    pub fn restore_defaults(&mut self) {
        self.config = MatchConfig::default();
        self.sync_names();
        info!("configuration restored to defaults");
    }

    /// Run an input action synchronously. Rolls resolve immediately.
    pub fn apply(&mut self, action: Action) -> Option<GameEvent> {
        match action {
            Action::Roll => self.roll_now(),
            Action::Hold => self.hold(),
            Action::Reset => Some(self.reset()),
        }
    }

    fn end_turn(&mut self) {
        self.current_score = 0;
        self.active = self.active.opponent();
    }

    fn is_current(&self, ticket: RollTicket) -> bool {
        self.phase
            == TurnPhase::Rolling {
                generation: ticket.generation,
            }
    }

    fn sync_names(&mut self) {
        for id in PlayerId::ALL {
            self.players[id].name = self.config.name(id).to_string();
        }
    }

    // === Queries ===

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Unbanked points of the active player.
    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn face_shown(&self) -> DieFace {
        self.face_shown
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.phase, TurnPhase::Rolling { .. })
    }

    pub fn in_progress(&self) -> bool {
        !matches!(self.phase, TurnPhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Percent of the target a player has banked, rounded and capped at 100.
    pub fn progress(&self, id: PlayerId) -> u8 {
        let total = u64::from(self.players[id].total());
        let target = u64::from(self.config.target_score.max(1));
        let percent = (total * 100 + target / 2) / target;
        percent.min(100) as u8
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let view = |id: PlayerId| {
            let player = &self.players[id];
            PlayerView {
                name: player.name.clone(),
                total: player.total(),
                history: player.history().to_vec(),
                progress: self.progress(id),
            }
        };

        GameSnapshot {
            players: [view(PlayerId::First), view(PlayerId::Second)],
            active_player: self.active,
            current_score: self.current_score,
            face_shown: self.face_shown,
            is_rolling: self.is_rolling(),
            in_progress: self.in_progress(),
            winner: self.winner(),
            busted: self.busted,
            target_score: self.config.target_score,
        }
    }
}
