//! The six-sided die.
//!
//! `DieFace` is a validated face value, and `DieRoller` is the seam the
//! engine draws authoritative rolls from. Production code uses
//! `RandomRoller`; tests swap in `testing::ScriptedRoller`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for die faces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid die face: {0} (expected 1-6)")]
    InvalidFace(u8),
}

/// A face of a six-sided die, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    pub const SIDES: u8 = 6;

    /// The face that ends a turn.
    pub const ONE: DieFace = DieFace(1);

    pub fn new(value: u8) -> Result<Self, DiceError> {
        if (1..=Self::SIDES).contains(&value) {
            Ok(DieFace(value))
        } else {
            Err(DiceError::InvalidFace(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this face forfeits the turn.
    pub fn is_bust(self) -> bool {
        self == Self::ONE
    }

    /// Draw a uniformly random face from any RNG.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        DieFace(rng.gen_range(1..=Self::SIDES))
    }
}

impl Default for DieFace {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for DieFace {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DieFace::new(value)
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> u8 {
        face.0
    }
}

impl From<DieFace> for u32 {
    fn from(face: DieFace) -> u32 {
        u32::from(face.0)
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of authoritative die rolls.
pub trait DieRoller: Send {
    fn roll(&mut self) -> DieFace;
}

/// Uniform roller backed by a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomRoller {
    rng: StdRng,
}

impl RandomRoller {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DieRoller for RandomRoller {
    fn roll(&mut self) -> DieFace {
        DieFace::random(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_bounds() {
        assert!(DieFace::new(0).is_err());
        assert!(DieFace::new(7).is_err());
        for value in 1..=6 {
            assert_eq!(DieFace::new(value).unwrap().value(), value);
        }
        assert_eq!(DieFace::new(9), Err(DiceError::InvalidFace(9)));
    }

    #[test]
    fn test_only_one_busts() {
        assert!(DieFace::ONE.is_bust());
        for value in 2..=6 {
            assert!(!DieFace::new(value).unwrap().is_bust());
        }
    }

    #[test]
    fn test_random_roller_stays_in_range() {
        let mut roller = RandomRoller::seeded(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let face = roller.roll();
            assert!((1..=6).contains(&face.value()));
            seen[(face.value() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every face should appear in 600 rolls");
    }

    #[test]
    fn test_seeded_rollers_agree() {
        let mut a = RandomRoller::seeded(42);
        let mut b = RandomRoller::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_face_serde() {
        let face = DieFace::new(4).unwrap();
        assert_eq!(serde_json::to_string(&face).unwrap(), "4");
        let parsed: DieFace = serde_json::from_str("6").unwrap();
        assert_eq!(parsed.value(), 6);
        assert!(serde_json::from_str::<DieFace>("0").is_err());
    }
}
