//! Testing utilities for the dice game.
//!
//! This module provides tools for deterministic tests:
//! - `ScriptedRoller` serves die faces from a script instead of an RNG
//! - `TestHarness` drives an engine through scripted scenarios

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::MatchConfig;
use crate::dice::{DieFace, DieRoller};
use crate::engine::{GameEngine, GameEvent};
use crate::player::PlayerId;

#[derive(Debug, Default)]
struct Script {
    faces: Vec<DieFace>,
    next: usize,
}

/// A die that rolls what it is told to.
///
/// Faces are served in order; once the script runs out it starts over from
/// the beginning. An empty script rolls 1. Clones share the same script, so a
/// test can keep a handle and `push` more faces after the roller has been
/// moved into an engine.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRoller {
    pub fn new(faces: Vec<DieFace>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script { faces, next: 0 })),
        }
    }

    /// Build from raw values. Values outside 1-6 are skipped.
    pub fn from_values(values: &[u8]) -> Self {
        Self::new(values.iter().filter_map(|v| DieFace::new(*v).ok()).collect())
    }

    /// Append a face to the script.
    pub fn push(&self, face: DieFace) {
        self.lock().faces.push(face);
    }

    /// Number of faces served so far.
    pub fn served(&self) -> usize {
        self.lock().next
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DieRoller for ScriptedRoller {
    fn roll(&mut self) -> DieFace {
        let mut script = self.lock();
        if script.faces.is_empty() {
            return DieFace::ONE;
        }
        let index = script.next % script.faces.len();
        script.next += 1;
        script.faces[index]
    }
}

/// Test harness for running game scenarios.
pub struct TestHarness {
    /// The engine under test.
    pub engine: GameEngine,
    dice: ScriptedRoller,
}

impl TestHarness {
    /// Default names, target 50.
    pub fn new() -> Self {
        Self::with_config(MatchConfig::default())
    }

    pub fn with_target(target: u32) -> Self {
        Self::with_config(MatchConfig::default().with_target_score(target))
    }

    pub fn with_config(config: MatchConfig) -> Self {
        let dice = ScriptedRoller::default();
        let engine = GameEngine::with_roller(config, dice.clone());
        Self { engine, dice }
    }

    /// Roll a specific face for the active player.
    ///
    /// # Panics
    ///
    /// If `face` is not in 1-6.
    pub fn roll(&mut self, face: u8) -> Option<GameEvent> {
        let face = match DieFace::new(face) {
            Ok(face) => face,
            Err(e) => panic!("scripted roll: {e}"),
        };
        self.dice.push(face);
        let served = self.dice.served();
        let event = self.engine.roll_now();
        if event.is_none() {
            // Rejected rolls never reach the die; drop the unused face.
            self.dice.lock().faces.truncate(served);
        }
        event
    }

    /// Roll each face in turn, collecting the events that happened.
    pub fn rolls(&mut self, faces: &[u8]) -> Vec<GameEvent> {
        faces.iter().filter_map(|face| self.roll(*face)).collect()
    }

    pub fn hold(&mut self) -> Option<GameEvent> {
        self.engine.hold()
    }

    /// Roll `faces` (none of them 1) and hold, banking their sum.
    pub fn bank(&mut self, faces: &[u8]) -> Option<GameEvent> {
        self.rolls(faces);
        self.hold()
    }

    pub fn reset(&mut self) -> GameEvent {
        self.engine.reset()
    }

    pub fn active(&self) -> PlayerId {
        self.engine.active_player()
    }

    pub fn total(&self, player: PlayerId) -> u32 {
        self.engine.player(player).total()
    }

    pub fn turn_score(&self) -> u32 {
        self.engine.current_score()
    }

    pub fn history(&self, player: PlayerId) -> Vec<u8> {
        self.engine
            .player(player)
            .history()
            .iter()
            .map(DieFace::value)
            .collect()
    }

    pub fn is_over(&self) -> bool {
        !self.engine.in_progress()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
