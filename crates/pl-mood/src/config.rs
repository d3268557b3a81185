//! Activity and quote tables for the mood journal.
//!
//! The tables are built once at startup, either from the built-in defaults
//! or from a JSON file, and are read-only afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MoodError, MoodResult};

/// Suggestions for each known mood plus the quotes to draw from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// Known moods (lowercase) and the activities suggested for them.
    pub activities: BTreeMap<String, Vec<String>>,
    /// Motivational quotes.
    pub quotes: Vec<String>,
    /// Activity suggested for moods not in `activities`.
    pub fallback_activity: String,
}

impl Default for MoodConfig {
    fn default() -> Self {
        let table: &[(&str, [&str; 3])] = &[
            (
                "happy",
                [
                    "Share your happiness with a friend!",
                    "Go for a walk and enjoy nature.",
                    "Listen to your favorite music.",
                ],
            ),
            (
                "sad",
                [
                    "Write down your feelings.",
                    "Watch a comforting movie.",
                    "Talk to someone you trust.",
                ],
            ),
            (
                "angry",
                [
                    "Try deep breathing exercises.",
                    "Go for a run or do some exercise.",
                    "Listen to calming music.",
                ],
            ),
            (
                "anxious",
                [
                    "Practice meditation for 5 minutes.",
                    "Make a to-do list to organize your thoughts.",
                    "Read a book you enjoy.",
                ],
            ),
            (
                "tired",
                [
                    "Take a short nap.",
                    "Drink a glass of water.",
                    "Stretch your body.",
                ],
            ),
            (
                "excited",
                [
                    "Start a new project!",
                    "Share your excitement with someone.",
                    "Plan something fun for the weekend.",
                ],
            ),
        ];

        Self {
            activities: table
                .iter()
                .map(|(mood, acts)| {
                    (
                        mood.to_string(),
                        acts.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
            quotes: [
                "Believe you can and you're halfway there.",
                "Every day is a second chance.",
                "You are stronger than you think.",
                "Stay positive, work hard, make it happen.",
                "Difficult roads often lead to beautiful destinations.",
            ]
            .iter()
            .map(|q| q.to_string())
            .collect(),
            fallback_activity: "Do something you enjoy or talk to a friend.".to_string(),
        }
    }
}

impl MoodConfig {
    /// Load a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> MoodResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MoodError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|source| MoodError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validated()
    }

    /// Normalize mood keys to lowercase and check every rule.
    ///
    /// Activities are stored as the last field of a comma-separated line,
    /// so they may not contain commas or line breaks.
    pub fn validated(self) -> MoodResult<Self> {
        if self.quotes.is_empty() {
            return Err(MoodError::InvalidConfig(
                "at least one quote is required".to_string(),
            ));
        }
        check_activity(&self.fallback_activity)?;

        let mut activities = BTreeMap::new();
        for (mood, acts) in self.activities {
            let key = mood.trim().to_lowercase();
            if key.is_empty() {
                return Err(MoodError::InvalidConfig("empty mood name".to_string()));
            }
            if acts.is_empty() {
                return Err(MoodError::InvalidConfig(format!(
                    "mood '{key}' has no activities"
                )));
            }
            for act in &acts {
                check_activity(act)?;
            }
            activities.insert(key, acts);
        }

        Ok(Self {
            activities,
            ..self
        })
    }

    /// Known moods in menu order.
    pub fn moods(&self) -> Vec<&str> {
        self.activities.keys().map(String::as_str).collect()
    }

    /// Activities for a mood, matched case-insensitively.
    pub fn activities_for(&self, mood: &str) -> Option<&[String]> {
        self.activities
            .get(&mood.trim().to_lowercase())
            .map(Vec::as_slice)
    }
}

fn check_activity(activity: &str) -> MoodResult<()> {
    if activity.trim().is_empty() {
        return Err(MoodError::InvalidConfig("empty activity".to_string()));
    }
    if activity.contains([',', '\n', '\r']) {
        return Err(MoodError::InvalidConfig(format!(
            "activity '{activity}' must not contain commas or line breaks"
        )));
    }
    Ok(())
}
