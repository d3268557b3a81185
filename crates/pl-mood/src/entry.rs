//! Mood journal entries and their one-line text form.

use chrono::{Local, NaiveDate};

use crate::error::{MoodError, MoodResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    /// Day the mood was recorded.
    pub date: NaiveDate,
    /// The mood as the user gave it.
    pub mood: String,
    /// The activity that was suggested.
    pub activity: String,
}

impl MoodEntry {
    /// Create an entry for an explicit date.
    pub fn new(
        date: NaiveDate,
        mood: impl Into<String>,
        activity: impl Into<String>,
    ) -> MoodResult<Self> {
        let mood = mood.into().trim().to_string();
        if mood.is_empty() {
            return Err(MoodError::EmptyMood);
        }
        if mood.contains(['\n', '\r']) {
            return Err(MoodError::MultilineMood);
        }
        Ok(Self {
            date,
            mood,
            activity: activity.into(),
        })
    }

    /// Create an entry dated today in local time.
    pub fn today(mood: impl Into<String>, activity: impl Into<String>) -> MoodResult<Self> {
        Self::new(Local::now().date_naive(), mood, activity)
    }

    /// Format as a `date,mood,activity` line without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{}",
            self.date.format(DATE_FORMAT),
            self.mood,
            self.activity
        )
    }

    /// Parse a `date,mood,activity` line.
    ///
    /// The first comma ends the date and the last comma starts the
    /// activity, so a mood may itself contain commas. Returns `None` for
    /// lines with fewer than two commas or an unreadable date.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let first = line.find(',')?;
        let last = line.rfind(',')?;
        if first == last {
            return None;
        }
        let date = NaiveDate::parse_from_str(&line[..first], DATE_FORMAT).ok()?;
        Some(Self {
            date,
            mood: line[first + 1..last].to_string(),
            activity: line[last + 1..].to_string(),
        })
    }
}

impl std::fmt::Display for MoodEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.date.format(DATE_FORMAT),
            self.mood,
            self.activity
        )
    }
}
