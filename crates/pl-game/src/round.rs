//! Round resolution.
//!
//! A round is won by the single highest roll. If two or more players share
//! the highest roll the round is a tie and nobody is credited.

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// One player rolled strictly higher than everyone else.
    Winner {
        /// Roster index of the winner.
        index: usize,
        /// The winning roll.
        roll: u32,
    },
    /// Several players shared the highest roll.
    Tie {
        /// Roster indices of the tied players, in roster order.
        indices: Vec<usize>,
        /// The shared roll.
        roll: u32,
    },
}

impl RoundOutcome {
    /// Roster index of the winner, if there was one.
    pub fn winner(&self) -> Option<usize> {
        match self {
            Self::Winner { index, .. } => Some(*index),
            Self::Tie { .. } => None,
        }
    }

    /// Whether the round was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, Self::Tie { .. })
    }

    /// The highest roll of the round.
    pub fn top_roll(&self) -> u32 {
        match self {
            Self::Winner { roll, .. } | Self::Tie { roll, .. } => *roll,
        }
    }
}

/// Decide the outcome of a round from rolls listed in roster order.
///
/// Returns `None` when `rolls` is empty.
pub fn resolve(rolls: &[u32]) -> Option<RoundOutcome> {
    let top = rolls.iter().copied().max()?;
    let indices: Vec<usize> = rolls
        .iter()
        .enumerate()
        .filter(|&(_, &r)| r == top)
        .map(|(i, _)| i)
        .collect();

    if indices.len() == 1 {
        Some(RoundOutcome::Winner {
            index: indices[0],
            roll: top,
        })
    } else {
        Some(RoundOutcome::Tie { indices, roll: top })
    }
}

/// A single roll within a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRoll {
    /// Name of the player who rolled.
    pub player: String,
    /// The value rolled.
    pub value: u32,
}

/// Everything that happened in one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// 1-based number of the round.
    pub round: u32,
    /// Rolls in roster order.
    pub rolls: Vec<TurnRoll>,
    /// Winner or tie.
    pub outcome: RoundOutcome,
}

impl RoundResult {
    /// Name of the round winner, if any.
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome
            .winner()
            .and_then(|i| self.rolls.get(i))
            .map(|t| t.player.as_str())
    }
}

impl std::fmt::Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rolls: Vec<String> = self
            .rolls
            .iter()
            .map(|t| format!("{} {}", t.player, t.value))
            .collect();
        write!(f, "Round {}: {}", self.round, rolls.join(", "))?;
        match self.winner_name() {
            Some(name) => write!(f, " -> {name} wins"),
            None => write!(f, " -> tie"),
        }
    }
}
