//! Players and their roll history.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::dice::DieFace;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerId {
    #[default]
    First,
    Second,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    /// The player who moves after this one.
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Most recent rolls of one player, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollHistory {
    rolls: VecDeque<DieFace>,
}

impl RollHistory {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self {
            rolls: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Append a roll, evicting the oldest once full.
    pub fn push(&mut self, face: DieFace) {
        if self.rolls.len() == Self::CAPACITY {
            self.rolls.pop_front();
        }
        self.rolls.push_back(face);
    }

    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    pub fn clear(&mut self) {
        self.rolls.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = DieFace> + '_ {
        self.rolls.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<DieFace> {
        self.rolls.iter().copied().collect()
    }
}

/// A participant in the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    total: u32,
    history: RollHistory,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: 0,
            history: RollHistory::new(),
        }
    }

    /// Banked points.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    pub(crate) fn record_roll(&mut self, face: DieFace) {
        self.history.push(face);
    }

    /// Bank a turn score and return the new total.
    pub(crate) fn bank(&mut self, points: u32) -> u32 {
        self.total = self.total.saturating_add(points);
        self.total
    }

    /// Clear score and history, keeping the name.
    pub(crate) fn clear(&mut self) {
        self.total = 0;
        self.history.clear();
    }
}

/// Both players, addressable by `PlayerId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players([Player; 2]);

impl Players {
    pub fn new(names: &[String; 2]) -> Self {
        Players([Player::new(names[0].clone()), Player::new(names[1].clone())])
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.0.iter_mut()
    }
}

impl Index<PlayerId> for Players {
    type Output = Player;

    fn index(&self, id: PlayerId) -> &Player {
        &self.0[id.index()]
    }
}

impl IndexMut<PlayerId> for Players {
    fn index_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.0[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(v: u8) -> DieFace {
        DieFace::new(v).unwrap()
    }

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(PlayerId::First.opponent(), PlayerId::Second);
        assert_eq!(PlayerId::Second.opponent(), PlayerId::First);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = RollHistory::new();
        for v in [2, 3, 4, 5, 6, 2, 3, 4, 5, 6] {
            history.push(face(v));
        }
        assert_eq!(history.len(), RollHistory::CAPACITY);

        history.push(face(1));
        assert_eq!(history.len(), RollHistory::CAPACITY);
        let rolls: Vec<u8> = history.iter().map(DieFace::value).collect();
        assert_eq!(rolls, vec![3, 4, 5, 6, 2, 3, 4, 5, 6, 1]);
    }

    #[test]
    fn test_bank_and_clear() {
        let mut player = Player::new("Ada");
        player.record_roll(face(4));
        assert_eq!(player.bank(4), 4);
        assert_eq!(player.bank(6), 10);

        player.clear();
        assert_eq!(player.total(), 0);
        assert!(player.history().is_empty());
        assert_eq!(player.name, "Ada");
    }
}
