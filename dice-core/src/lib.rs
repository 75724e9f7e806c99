//! Two-player Pig dice game engine.
//!
//! This crate provides:
//! - The turn and scoring state machine (`GameEngine`)
//! - Timed, cancellable rolls with observable state (`GameSession`)
//! - Match configuration with validation and environment overrides
//! - Named input actions for key bindings
//! - Deterministic dice and a scenario harness for tests
//!
//! # Rules
//!
//! Players take turns rolling one die. Each roll adds its face to the turn
//! score, except a 1, which wipes the turn score and passes the turn. Holding
//! banks the turn score. The first player to bank the target score wins.
//!
//! # Quick Start
//!
//! ```ignore
//! use dice_core::{Action, GameSession, MatchConfig, RollTiming};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = GameSession::new(MatchConfig::default(), RollTiming::default());
//!
//!     session.dispatch(Action::Roll).await;
//!     let snapshot = session.wait_idle().await;
//!     println!("{} has {} this turn", snapshot.active().name, snapshot.current_score);
//!
//!     session.dispatch(Action::Hold).await;
//! }
//! ```

pub mod actions;
pub mod config;
pub mod dice;
pub mod engine;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod testing;

// Primary public API
pub use actions::{Action, ActionError};
pub use config::{ConfigError, MatchConfig, RollTiming, Settings};
pub use dice::{DiceError, DieFace, DieRoller, RandomRoller};
pub use engine::{GameEngine, GameEvent, RollTicket, TurnPhase};
pub use player::{Player, PlayerId, RollHistory};
pub use session::GameSession;
pub use snapshot::{GameSnapshot, PlayerView};
pub use testing::{ScriptedRoller, TestHarness};
