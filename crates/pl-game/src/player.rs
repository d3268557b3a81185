//! Players and their per-session statistics.
//!
//! A player keeps a cumulative score, the ordered history of every roll it
//! produced, and a win count. Best and average roll are derived from the
//! history and refreshed on every mutation, so they can never drift from
//! the raw rolls.

/// A player in a dice game session.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    score: u32,
    history: Vec<u32>,
    wins: u32,
    best_roll: u32,
    average_roll: f64,
}

impl Player {
    /// Create a player with no score, no rolls and no wins.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            history: Vec::new(),
            wins: 0,
            best_roll: 0,
            average_roll: 0.0,
        }
    }

    /// The default name for the player at 1-based `position`.
    pub fn default_name(position: usize) -> String {
        format!("Player {position}")
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cumulative score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Every roll so far, oldest first.
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    /// Rounds won.
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Highest roll in the history, or 0 if there are none.
    pub fn best_roll(&self) -> u32 {
        self.best_roll
    }

    /// Mean of the history, or 0.0 if there are none.
    pub fn average_roll(&self) -> f64 {
        self.average_roll
    }

    /// Population variance of the history, `None` if there are no rolls.
    pub fn variance(&self) -> Option<f64> {
        if self.history.is_empty() {
            return None;
        }
        let mean = self.average_roll;
        let sum_sq: f64 = self
            .history
            .iter()
            .map(|&r| {
                let d = f64::from(r) - mean;
                d * d
            })
            .sum();
        Some(sum_sq / self.history.len() as f64)
    }

    /// Record a roll and refresh the derived stats.
    pub fn add_roll(&mut self, value: u32) {
        self.history.push(value);
        self.refresh_stats();
    }

    /// Add points to the score. Kept apart from `add_roll` so scoring can
    /// differ from the pip count.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Credit a round win.
    pub fn increment_wins(&mut self) {
        self.wins = self.wins.saturating_add(1);
    }

    /// Set the win count directly. Used when restoring a saved game.
    pub(crate) fn set_wins(&mut self, wins: u32) {
        self.wins = wins;
    }

    /// Clear score and history for a new session. Wins carry over.
    pub fn reset(&mut self) {
        self.score = 0;
        self.history.clear();
        self.refresh_stats();
    }

    fn refresh_stats(&mut self) {
        self.best_roll = self.history.iter().copied().max().unwrap_or(0);
        self.average_roll = if self.history.is_empty() {
            0.0
        } else {
            let total: u64 = self.history.iter().map(|&r| u64::from(r)).sum();
            total as f64 / self.history.len() as f64
        };
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} pts, {} wins, best {}, avg {:.2}",
            self.name, self.score, self.wins, self.best_roll, self.average_roll
        )
    }
}
