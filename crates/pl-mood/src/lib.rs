//! Mood journal for Parlour.
//!
//! Records how the user feels, suggests an activity and a motivational
//! quote, and keeps an append-only history file of `date,mood,activity`
//! lines.

pub mod config;
pub mod entry;
pub mod error;
pub mod log;
pub mod suggest;

pub use config::MoodConfig;
pub use entry::MoodEntry;
pub use error::{MoodError, MoodResult};
pub use log::MoodLog;
pub use suggest::{MoodChoice, Suggestion, interpret_choice};
