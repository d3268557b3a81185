//! Error types for the dice game.

use thiserror::Error;

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

/// Result type for save and load operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors raised while setting up or playing a session.
#[derive(Debug, Error)]
pub enum GameError {
    /// The die face count is outside 4..=12.
    #[error("a die must have between 4 and 12 sides, got {0}")]
    InvalidDie(u32),

    /// The roster size is outside 2..=4.
    #[error("a game needs between 2 and 4 players, got {0}")]
    InvalidPlayerCount(usize),

    /// A player name was empty after trimming.
    #[error("player names must not be empty")]
    EmptyPlayerName,

    /// The round count or target score is zero.
    #[error("invalid game length: {0}")]
    InvalidLength(String),

    /// The wrong number of rolls was supplied for a round.
    #[error("expected {expected} rolls, got {got}")]
    RollCountMismatch {
        /// Number of players in the roster.
        expected: usize,
        /// Number of rolls supplied.
        got: usize,
    },

    /// A roll is not a face of the session's die.
    #[error("roll {value} is not on a d{sides}")]
    RollOutOfRange {
        /// The offending value.
        value: u32,
        /// Face count of the die.
        sides: u32,
    },

    /// The session is over; no more rounds can be played.
    #[error("the game is already over")]
    SessionComplete,

    /// A round has turns still pending.
    #[error("round {0} is still in progress")]
    RoundInProgress(u32),
}

/// Errors raised while encoding or decoding a save file.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The underlying file could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file ended before the record was complete.
    #[error("save file is truncated")]
    Truncated,

    /// The file does not start with the save magic.
    #[error("not a dice game save file")]
    BadMagic,

    /// The file was written by an unknown format version.
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),

    /// A field holds a value the format does not allow.
    #[error("corrupt save file: {0}")]
    Corrupt(String),

    /// A value does not fit the fixed-width field it is stored in.
    #[error("{0} does not fit in the save format")]
    Overflow(&'static str),

    /// The decoded session breaks a game rule.
    #[error("invalid game in save file: {0}")]
    InvalidGame(#[from] GameError),

    /// The session cannot be saved in its current state.
    #[error("cannot save: {0}")]
    Refused(GameError),
}
