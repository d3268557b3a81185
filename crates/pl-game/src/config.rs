//! Configuration for a dice game session.

use crate::dice::Die;
use crate::error::{GameError, GameResult};
use crate::player::Player;

/// Smallest roster.
pub const MIN_PLAYERS: usize = 2;
/// Largest roster.
pub const MAX_PLAYERS: usize = 4;

/// How long a session lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Play a fixed number of rounds.
    Rounds(u32),
    /// Play until someone's score reaches the target.
    TargetScore(u32),
}

impl GameMode {
    /// The round count or target score.
    pub fn limit(self) -> u32 {
        match self {
            Self::Rounds(n) | Self::TargetScore(n) => n,
        }
    }

    fn validate(self) -> GameResult<()> {
        match self {
            Self::Rounds(0) => Err(GameError::InvalidLength(
                "a game needs at least one round".to_string(),
            )),
            Self::TargetScore(0) => Err(GameError::InvalidLength(
                "the target score must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for GameMode {
    fn default() -> Self {
        Self::Rounds(5)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rounds(1) => write!(f, "1 round"),
            Self::Rounds(n) => write!(f, "{n} rounds"),
            Self::TargetScore(n) => write!(f, "first to {n} points"),
        }
    }
}

/// Setup for a new session: mode, die and roster.
#[derive(Debug, Clone, Default)]
pub struct GameSetup {
    /// Session length.
    pub mode: GameMode,
    /// The die every player rolls.
    pub die: Die,
    /// Player names in turn order. Empty names become `Player N`.
    pub names: Vec<String>,
}

impl GameSetup {
    /// Set the session length.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the die.
    pub fn with_die(mut self, die: Die) -> Self {
        self.die = die;
        self
    }

    /// Append a player. A blank name is replaced by the default for its seat.
    pub fn add_player(mut self, name: impl Into<String>) -> Self {
        let name: String = name.into();
        let name = name.trim();
        let name = if name.is_empty() {
            Player::default_name(self.names.len() + 1)
        } else {
            name.to_string()
        };
        self.names.push(name);
        self
    }

    /// Check the setup and build the roster.
    pub(crate) fn into_parts(self) -> GameResult<(GameMode, Die, Vec<Player>)> {
        self.mode.validate()?;
        Die::from_sides(self.die.sides())?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.names.len()) {
            return Err(GameError::InvalidPlayerCount(self.names.len()));
        }
        if self.names.iter().any(|n| n.trim().is_empty()) {
            return Err(GameError::EmptyPlayerName);
        }
        let players = self.names.into_iter().map(Player::new).collect();
        Ok((self.mode, self.die, players))
    }
}
