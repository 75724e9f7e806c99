//! Read-only view of a match for rendering.

use serde::{Deserialize, Serialize};

use crate::dice::DieFace;
use crate::player::PlayerId;

/// One player as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub total: u32,
    /// Oldest first, at most `RollHistory::CAPACITY` entries.
    pub history: Vec<DieFace>,
    /// Percent of the target banked, 0-100.
    pub progress: u8,
}

impl PlayerView {
    /// The last `n` rolls, oldest first.
    pub fn recent(&self, n: usize) -> &[DieFace] {
        &self.history[self.history.len().saturating_sub(n)..]
    }
}

/// Everything a front end needs to draw the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: [PlayerView; 2],
    pub active_player: PlayerId,
    pub current_score: u32,
    pub face_shown: DieFace,
    pub is_rolling: bool,
    pub in_progress: bool,
    pub winner: Option<PlayerId>,
    /// Who just rolled a 1. Cleared by the next roll, hold or reset.
    pub busted: Option<PlayerId>,
    pub target_score: u32,
}

impl GameSnapshot {
    pub fn player(&self, id: PlayerId) -> &PlayerView {
        &self.players[id.index()]
    }

    pub fn active(&self) -> &PlayerView {
        self.player(self.active_player)
    }

    /// Unbanked points shown beside a player: the turn score for the active
    /// player, zero for the other.
    pub fn turn_score_for(&self, id: PlayerId) -> u32 {
        if id == self.active_player {
            self.current_score
        } else {
            0
        }
    }

    /// Whether roll and hold would currently be accepted.
    pub fn can_act(&self) -> bool {
        self.in_progress && !self.is_rolling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;
    use crate::engine::GameEngine;
    use crate::testing::ScriptedRoller;

    #[test]
    fn test_turn_score_only_for_active() {
        let mut engine = GameEngine::with_roller(MatchConfig::default(), ScriptedRoller::from_values(&[5]));
        engine.roll_now();
        let snap = engine.snapshot();
        assert_eq!(snap.turn_score_for(PlayerId::First), 5);
        assert_eq!(snap.turn_score_for(PlayerId::Second), 0);
        assert_eq!(snap.active().name, "Player 1");
        assert!(snap.can_act());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let engine = GameEngine::new(MatchConfig::default());
        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["active_player"], "First");
        assert_eq!(json["face_shown"], 1);
        assert_eq!(json["target_score"], 50);
        assert_eq!(json["players"][1]["name"], "Player 2");
        assert!(json["winner"].is_null());
        assert!(json["busted"].is_null());
    }

    #[test]
    fn test_recent_returns_tail() {
        let faces: Vec<u8> = vec![2, 3, 4, 5, 6];
        let mut engine = GameEngine::with_roller(MatchConfig::default(), ScriptedRoller::from_values(&faces));
        for _ in &faces {
            engine.roll_now();
        }
        let snap = engine.snapshot();
        let tail: Vec<u8> = snap.players[0].recent(3).iter().map(|f| f.value()).collect();
        assert_eq!(tail, vec![4, 5, 6]);
        assert_eq!(snap.players[0].recent(20).len(), 5);
        assert!(snap.players[1].recent(3).is_empty());
    }
}
