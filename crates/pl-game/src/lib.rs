//! Turn-based dice game engine for Parlour.
//!
//! Provides the game die, players with running statistics, round
//! resolution, the session state machine that drives rounds from setup to
//! final results, and a fixed-width binary save format.

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod round;
pub mod save;
pub mod session;

pub use config::{GameMode, GameSetup};
pub use dice::Die;
pub use error::{GameError, GameResult, SaveError, SaveResult};
pub use player::Player;
pub use round::{RoundOutcome, RoundResult, TurnRoll};
pub use save::{load_from_path, save_to_path};
pub use session::{GameSession, Phase, Turn};
