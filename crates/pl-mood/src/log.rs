//! The mood history file.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::entry::MoodEntry;
use crate::error::{MoodError, MoodResult};

/// Default history file name.
pub const DEFAULT_LOG_FILE: &str = "mood_history.txt";

/// An append-only mood history stored as text lines.
#[derive(Debug, Clone)]
pub struct MoodLog {
    path: PathBuf,
}

impl MoodLog {
    /// Use the history file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry, creating the file if needed.
    pub fn append(&self, entry: &MoodEntry) -> MoodResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        writeln!(file, "{}", entry.to_line()).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), mood = %entry.mood, "mood recorded");
        Ok(())
    }

    /// Read every entry, oldest first. A missing file is an empty history.
    pub fn load(&self) -> MoodResult<Vec<MoodEntry>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut entries = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| self.io_error(e))?;
            if line.trim().is_empty() {
                continue;
            }
            match MoodEntry::parse_line(&line) {
                Some(entry) => entries.push(entry),
                None => warn!(line = number + 1, "skipping malformed mood history line"),
            }
        }
        Ok(entries)
    }

    /// How often each mood was recorded, most frequent first. Moods are
    /// grouped case-insensitively; ties are ordered by name.
    pub fn summary(&self) -> MoodResult<Vec<(String, usize)>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entry in self.load()? {
            *counts.entry(entry.mood.to_lowercase()).or_default() += 1;
        }
        let mut summary: Vec<(String, usize)> = counts.into_iter().collect();
        summary.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(summary)
    }

    fn io_error(&self, source: std::io::Error) -> MoodError {
        MoodError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for MoodLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}
