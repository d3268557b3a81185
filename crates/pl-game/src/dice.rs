//! The game die.
//!
//! Every player in a session rolls the same single die. Face counts are
//! limited to 4 through 12 so that rounds stay short and ties stay rare.

use rand::Rng;

use crate::error::{GameError, GameResult};

/// Smallest supported face count.
pub const MIN_SIDES: u32 = 4;
/// Largest supported face count.
pub const MAX_SIDES: u32 = 12;

/// A polyhedral die with 4 to 12 faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    #[default]
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Any other face count inside the supported range.
    Custom(u32),
}

impl Die {
    /// Build a die from a face count, rejecting counts outside 4..=12.
    pub fn from_sides(sides: u32) -> GameResult<Self> {
        match sides {
            4 => Ok(Self::D4),
            6 => Ok(Self::D6),
            8 => Ok(Self::D8),
            10 => Ok(Self::D10),
            12 => Ok(Self::D12),
            n if (MIN_SIDES..=MAX_SIDES).contains(&n) => Ok(Self::Custom(n)),
            n => Err(GameError::InvalidDie(n)),
        }
    }

    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::Custom(n) => n,
        }
    }

    /// Parse a die from a tag like "d6" or "D10".
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let sides = s.strip_prefix('d')?.parse::<u32>().ok()?;
        Self::from_sides(sides).ok()
    }

    /// Whether `value` is a face of this die.
    pub fn contains(self, value: u32) -> bool {
        (1..=self.sides()).contains(&value)
    }

    /// Roll the die once.
    pub fn roll<R: Rng>(self, rng: &mut R) -> u32 {
        rng.random_range(1..=self.sides())
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}
