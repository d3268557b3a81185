//! Mood menu input and activity suggestions.

use rand::Rng;

use crate::config::MoodConfig;
use crate::error::{MoodError, MoodResult};

/// What a line typed at the mood prompt means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodChoice {
    /// A numbered mood from the menu.
    Listed(String),
    /// A number that is not on the menu, or nothing at all; the user
    /// should be asked to type a mood.
    AskForMood,
    /// Free text taken as the mood itself.
    Typed(String),
}

/// Interpret input at the mood prompt.
///
/// Input starting with a digit is read as a menu number (leading digits
/// only). Anything else is the mood itself.
pub fn interpret_choice(input: &str, config: &MoodConfig) -> MoodChoice {
    let input = input.trim();
    if input.is_empty() {
        return MoodChoice::AskForMood;
    }
    if !input.starts_with(|c: char| c.is_ascii_digit()) {
        return MoodChoice::Typed(input.to_string());
    }

    let digits: String = input.chars().take_while(char::is_ascii_digit).collect();
    let moods = config.moods();
    match digits.parse::<usize>() {
        Ok(n) if (1..=moods.len()).contains(&n) => MoodChoice::Listed(moods[n - 1].to_string()),
        _ => MoodChoice::AskForMood,
    }
}

/// An activity and a quote for a mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// The mood as given.
    pub mood: String,
    /// Suggested activity.
    pub activity: String,
    /// Motivational quote.
    pub quote: String,
}

impl MoodConfig {
    /// Pick an activity for `mood` and a quote. Unknown moods get the
    /// fallback activity.
    pub fn suggest<R: Rng>(&self, mood: &str, rng: &mut R) -> MoodResult<Suggestion> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(MoodError::EmptyMood);
        }
        let activity = match self.activities_for(mood) {
            Some(acts) => pick(acts, rng).unwrap_or(&self.fallback_activity).clone(),
            None => self.fallback_activity.clone(),
        };
        let quote = pick(&self.quotes, rng)
            .cloned()
            .ok_or_else(|| MoodError::InvalidConfig("no quotes configured".to_string()))?;
        Ok(Suggestion {
            mood: mood.to_string(),
            activity,
            quote,
        })
    }
}

fn pick<'a, R: Rng>(items: &'a [String], rng: &mut R) -> Option<&'a String> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.random_range(0..items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn numbers_pick_sorted_moods() {
        let cfg = MoodConfig::default();
        assert_eq!(
            interpret_choice("1", &cfg),
            MoodChoice::Listed("angry".to_string())
        );
        assert_eq!(
            interpret_choice("4", &cfg),
            MoodChoice::Listed("happy".to_string())
        );
        assert_eq!(
            interpret_choice(" 6 ", &cfg),
            MoodChoice::Listed("tired".to_string())
        );
    }

    #[test]
    fn leading_digits_only() {
        let cfg = MoodConfig::default();
        assert_eq!(
            interpret_choice("2nd", &cfg),
            MoodChoice::Listed("anxious".to_string())
        );
    }

    #[test]
    fn out_of_range_number_asks_for_text() {
        let cfg = MoodConfig::default();
        assert_eq!(interpret_choice("7", &cfg), MoodChoice::AskForMood);
        assert_eq!(interpret_choice("0", &cfg), MoodChoice::AskForMood);
        assert_eq!(
            interpret_choice("99999999999999999999999", &cfg),
            MoodChoice::AskForMood
        );
        assert_eq!(interpret_choice("", &cfg), MoodChoice::AskForMood);
    }

    #[test]
    fn text_is_the_mood() {
        let cfg = MoodConfig::default();
        assert_eq!(
            interpret_choice("  bored ", &cfg),
            MoodChoice::Typed("bored".to_string())
        );
    }

    #[test]
    fn known_mood_gets_listed_activity() {
        let cfg = MoodConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let s = cfg.suggest("Tired", &mut rng).unwrap();
            assert_eq!(s.mood, "Tired");
            assert!(cfg.activities["tired"].contains(&s.activity));
            assert!(cfg.quotes.contains(&s.quote));
        }
    }

    #[test]
    fn unknown_mood_gets_fallback() {
        let cfg = MoodConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let s = cfg.suggest("bored", &mut rng).unwrap();
        assert_eq!(s.activity, cfg.fallback_activity);
    }

    #[test]
    fn empty_mood_rejected() {
        let cfg = MoodConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            cfg.suggest("  ", &mut rng),
            Err(MoodError::EmptyMood)
        ));
    }

    #[test]
    fn same_seed_same_suggestion() {
        let cfg = MoodConfig::default();
        let a = cfg.suggest("happy", &mut StdRng::seed_from_u64(9)).unwrap();
        let b = cfg.suggest("happy", &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
