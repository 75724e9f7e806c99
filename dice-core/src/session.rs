//! GameSession - a timed, observable wrapper around `GameEngine`.
//!
//! The engine is a plain state machine. The session adds the parts a live
//! front end needs:
//! - Rolls take `RollTiming::duration` to resolve, with a transient face
//!   shown every `RollTiming::tick` until then
//! - `reset()` cancels a roll in flight before starting over
//! - Every change is published as a `GameSnapshot` on a `watch` channel, and
//!   as a `GameEvent` on a `broadcast` channel
//!
//! All engine access goes through one async mutex, so operations are
//! serialized no matter how many handles exist.
//!
//! # Example
//!
//! ```ignore
//! use dice_core::{GameSession, MatchConfig, RollTiming};
//!
//! #[tokio::main]
//! async fn main() {
//!     let session = GameSession::new(MatchConfig::default(), RollTiming::default());
//!     let mut updates = session.subscribe();
//!
//!     session.roll().await;
//!     let snapshot = session.wait_idle().await;
//!     println!("rolled {}", snapshot.face_shown);
//!
//!     updates.changed().await.ok();
//! }
//! ```

use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::actions::Action;
use crate::config::{ConfigError, MatchConfig, RollTiming, Settings};
use crate::engine::{GameEngine, GameEvent, RollTicket};
use crate::snapshot::GameSnapshot;

const EVENT_CAPACITY: usize = 64;

struct SessionState {
    engine: GameEngine,
    /// The task resolving the roll in flight, if any.
    pending: Option<JoinHandle<()>>,
}

struct Shared {
    state: Mutex<SessionState>,
    snapshots: watch::Sender<GameSnapshot>,
    events: broadcast::Sender<GameEvent>,
    timing: RollTiming,
}

impl Shared {
    fn publish(&self, engine: &GameEngine, event: Option<GameEvent>) {
        self.snapshots.send_replace(engine.snapshot());
        if let Some(event) = event {
            // No subscribers is fine.
            self.events.send(event).ok();
        }
    }
}

/// A live game.
///
/// Cheap to clone; clones drive the same match.
#[derive(Clone)]
pub struct GameSession {
    shared: Arc<Shared>,
}

impl GameSession {
    /// New session with a uniformly random die.
    pub fn new(config: MatchConfig, timing: RollTiming) -> Self {
        Self::with_engine(GameEngine::new(config), timing)
    }

    /// Wrap an existing engine.
    pub fn with_engine(engine: GameEngine, timing: RollTiming) -> Self {
        let (snapshots, _) = watch::channel(engine.snapshot());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState {
                    engine,
                    pending: None,
                }),
                snapshots,
                events,
                timing,
            }),
        }
    }

    /// Latest state.
    pub fn snapshot(&self) -> GameSnapshot {
        self.shared.snapshots.borrow().clone()
    }

    /// Receive a fresh snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.shared.snapshots.subscribe()
    }

    /// Receive game events from now on.
    pub fn events(&self) -> broadcast::Receiver<GameEvent> {
        self.shared.events.subscribe()
    }

    pub fn timing(&self) -> RollTiming {
        self.shared.timing
    }

    /// Start a timed roll.
    ///
    /// Returns `false` if the roll was ignored (already rolling, or the game
    /// is over). The outcome arrives later through the channels.
    pub async fn roll(&self) -> bool {
        let mut state = self.shared.state.lock().await;
        let Some(ticket) = state.engine.roll() else {
            return false;
        };

        self.shared.publish(
            &state.engine,
            Some(GameEvent::RollStarted {
                player: ticket.player,
            }),
        );
        debug!(
            "roll #{} resolves in {:?}",
            ticket.generation, self.shared.timing.duration
        );

        let shared = Arc::clone(&self.shared);
        state.pending = Some(tokio::spawn(run_roll(shared, ticket)));
        true
    }

    /// Bank the turn score. Ignored while rolling or after the game is over.
    pub async fn hold(&self) -> Option<GameEvent> {
        let mut state = self.shared.state.lock().await;
        let event = state.engine.hold();
        if event.is_some() {
            self.shared.publish(&state.engine, event.clone());
        }
        event
    }

    /// Cancel any roll in flight and start a new match.
    pub async fn reset(&self) {
        let mut state = self.shared.state.lock().await;
        if let Some(pending) = state.pending.take() {
            pending.abort();
            debug!("pending roll cancelled by reset");
        }
        let event = state.engine.reset();
        self.shared.publish(&state.engine, Some(event));
    }

    /// Update names and/or target. Does not reset the match.
    pub async fn configure(&self, settings: &Settings) -> Result<(), ConfigError> {
        let mut state = self.shared.state.lock().await;
        let before = state.engine.config().clone();
        let result = state.engine.configure(settings);
        if *state.engine.config() != before {
            self.shared.publish(&state.engine, Some(GameEvent::Configured));
        }
        result
    }

    /// Put the default names and target back. Does not reset the match.
    pub async fn restore_defaults(&self) {
        let mut state = self.shared.state.lock().await;
        state.engine.restore_defaults();
        self.shared.publish(&state.engine, Some(GameEvent::Configured));
    }

    pub async fn config(&self) -> MatchConfig {
        self.shared.state.lock().await.engine.config().clone()
    }

    /// Run an input action. Returns whether it was accepted.
    pub async fn dispatch(&self, action: Action) -> bool {
        match action {
            Action::Roll => self.roll().await,
            Action::Hold => self.hold().await.is_some(),
            Action::Reset => {
                self.reset().await;
                true
            }
        }
    }

    /// Wait until no roll is in flight and return the state at that point.
    pub async fn wait_idle(&self) -> GameSnapshot {
        let mut updates = self.subscribe();
        let idle = updates.wait_for(|snapshot| !snapshot.is_rolling).await;
        match idle {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }
}

/// Body of the task spawned for each roll.
///
/// Flickers until the deadline, then resolves. Exits early if the ticket
/// goes stale.
async fn run_roll(shared: Arc<Shared>, ticket: RollTicket) {
    let timing = shared.timing;
    let deadline = time::sleep(timing.duration);
    tokio::pin!(deadline);

    if let Some(tick) = timing.tick {
        let mut ticker = time::interval_at(Instant::now() + tick, tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => break,
                _ = ticker.tick() => {
                    let mut state = shared.state.lock().await;
                    match state.engine.flicker(ticket) {
                        Some(face) => {
                            trace!("flicker {face}");
                            shared.publish(&state.engine, None);
                        }
                        None => return,
                    }
                }
            }
        }
    } else {
        deadline.await;
    }

    let mut state = shared.state.lock().await;
    if let Some(event) = state.engine.resolve_roll(ticket) {
        state.pending = None;
        shared.publish(&state.engine, Some(event));
    }
}
