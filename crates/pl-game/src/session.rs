//! Dice game session management.
//!
//! `GameSession` owns the roster and drives the round state machine:
//! players roll one at a time in roster order, and once everyone has rolled
//! the round resolves, scores are applied and the round counter advances.
//! The session is complete once the configured round count is exhausted or,
//! in target mode, once a player reaches the target score.

use rand::Rng;
use tracing::debug;

use crate::config::{GameMode, GameSetup};
use crate::dice::Die;
use crate::error::{GameError, GameResult};
use crate::player::Player;
use crate::round::{RoundResult, TurnRoll, resolve};

/// Where a session is in its round cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Between rounds; the next roll starts a new round.
    AwaitingRound,
    /// Some players have rolled this round.
    RoundInProgress {
        /// Roster index of the player due to roll next.
        next_player: usize,
    },
    /// No more rounds can be played.
    Complete,
}

/// One player's roll, plus the round result if it was the last turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Roster index of the player who rolled.
    pub player: usize,
    /// The value rolled.
    pub value: u32,
    /// Set when this roll closed the round.
    pub result: Option<RoundResult>,
}

/// A dice game from setup to final results.
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    die: Die,
    players: Vec<Player>,
    current_round: u32,
    pending: Vec<u32>,
    dirty: bool,
}

impl GameSession {
    /// Start a session from a setup.
    pub fn new(setup: GameSetup) -> GameResult<Self> {
        let (mode, die, players) = setup.into_parts()?;
        debug!(%mode, %die, players = players.len(), "new game");
        Ok(Self {
            mode,
            die,
            players,
            current_round: 1,
            pending: Vec::new(),
            dirty: false,
        })
    }

    /// Rebuild a session from saved parts. Validates the same rules as `new`.
    pub(crate) fn restore(
        mode: GameMode,
        die: Die,
        players: Vec<Player>,
        current_round: u32,
    ) -> GameResult<Self> {
        let names = players.iter().map(|p| p.name().to_string()).collect();
        GameSetup { mode, die, names }.into_parts()?;

        let max_round = match mode {
            GameMode::Rounds(n) => n.saturating_add(1),
            GameMode::TargetScore(_) => u32::MAX,
        };
        if !(1..=max_round).contains(&current_round) {
            return Err(GameError::InvalidLength(format!(
                "round {current_round} is outside 1..={max_round}"
            )));
        }

        Ok(Self {
            mode,
            die,
            players,
            current_round,
            pending: Vec::new(),
            dirty: false,
        })
    }

    #[cfg(test)]
    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Session length.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The die in play.
    pub fn die(&self) -> Die {
        self.die
    }

    /// Players in roster order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// 1-based number of the round being played, or one past the last.
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Whether there is unsaved progress.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the unsaved-progress flag.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Whether no more rounds can be played.
    pub fn is_complete(&self) -> bool {
        match self.mode {
            GameMode::Rounds(n) => self.current_round > n,
            GameMode::TargetScore(target) => self.players.iter().any(|p| p.score() >= target),
        }
    }

    /// Current position in the round cycle.
    pub fn phase(&self) -> Phase {
        if !self.pending.is_empty() {
            Phase::RoundInProgress {
                next_player: self.pending.len(),
            }
        } else if self.is_complete() {
            Phase::Complete
        } else {
            Phase::AwaitingRound
        }
    }

    /// The player due to roll next, if the game is still running.
    pub fn next_player(&self) -> Option<&Player> {
        match self.phase() {
            Phase::Complete => None,
            _ => self.players.get(self.pending.len()),
        }
    }

    /// Fails if a round has rolls pending.
    pub fn ensure_between_rounds(&self) -> GameResult<()> {
        if self.pending.is_empty() {
            Ok(())
        } else {
            Err(GameError::RoundInProgress(self.current_round))
        }
    }

    /// Roll for the next player. The last roll of a round resolves it.
    pub fn roll_turn<R: Rng>(&mut self, rng: &mut R) -> GameResult<Turn> {
        if self.phase() == Phase::Complete {
            return Err(GameError::SessionComplete);
        }
        let player = self.pending.len();
        let value = self.die.roll(rng);
        self.pending.push(value);
        self.dirty = true;
        debug!(round = self.current_round, player, value, "turn rolled");

        let result = if self.pending.len() == self.players.len() {
            Some(self.resolve_pending()?)
        } else {
            None
        };
        Ok(Turn {
            player,
            value,
            result,
        })
    }

    /// Play every remaining turn of the current round.
    pub fn play_round<R: Rng>(&mut self, rng: &mut R) -> GameResult<RoundResult> {
        loop {
            if let Some(result) = self.roll_turn(rng)?.result {
                return Ok(result);
            }
        }
    }

    /// Play a whole round with the given rolls, in roster order.
    pub fn play_round_with(&mut self, rolls: &[u32]) -> GameResult<RoundResult> {
        if self.is_complete() {
            return Err(GameError::SessionComplete);
        }
        self.ensure_between_rounds()?;
        if rolls.len() != self.players.len() {
            return Err(GameError::RollCountMismatch {
                expected: self.players.len(),
                got: rolls.len(),
            });
        }
        if let Some(&value) = rolls.iter().find(|&&v| !self.die.contains(v)) {
            return Err(GameError::RollOutOfRange {
                value,
                sides: self.die.sides(),
            });
        }

        self.pending = rolls.to_vec();
        self.dirty = true;
        self.resolve_pending()
    }

    fn resolve_pending(&mut self) -> GameResult<RoundResult> {
        let rolls = std::mem::take(&mut self.pending);
        let outcome = resolve(&rolls).ok_or(GameError::InvalidPlayerCount(0))?;
        for (player, &value) in self.players.iter_mut().zip(&rolls) {
            player.add_roll(value);
            player.add_score(value);
        }
        if let Some(winner) = outcome.winner() {
            self.players[winner].increment_wins();
        }

        let round = self.current_round;
        self.current_round = self.current_round.saturating_add(1);
        debug!(round, ?outcome, "round resolved");

        Ok(RoundResult {
            round,
            rolls: self
                .players
                .iter()
                .zip(rolls)
                .map(|(p, value)| TurnRoll {
                    player: p.name().to_string(),
                    value,
                })
                .collect(),
            outcome,
        })
    }

    /// Players ranked by score, highest first. Equal scores keep roster order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(p.score()));
        ranked
    }

    /// The highest single roll of the session and who rolled it first.
    pub fn highest_roll(&self) -> Option<(&Player, u32)> {
        let mut best: Option<(&Player, u32)> = None;
        for player in &self.players {
            if player.history().is_empty() {
                continue;
            }
            let roll = player.best_roll();
            if best.is_none_or(|(_, top)| roll > top) {
                best = Some((player, roll));
            }
        }
        best
    }

    /// The player whose rolls varied least. Players without rolls never
    /// qualify; ties go to the earlier seat.
    pub fn most_consistent(&self) -> Option<&Player> {
        let mut best: Option<(&Player, f64)> = None;
        for player in &self.players {
            let Some(variance) = player.variance() else {
                continue;
            };
            if best.is_none_or(|(_, low)| variance < low) {
                best = Some((player, variance));
            }
        }
        best.map(|(p, _)| p)
    }

    /// Start over with the same roster and settings. Wins carry over.
    pub fn rematch(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.current_round = 1;
        self.pending.clear();
        self.dirty = true;
        debug!("rematch started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(names: &[&str], mode: GameMode) -> GameSession {
        let setup = names
            .iter()
            .fold(GameSetup::default().with_mode(mode), |s, n| s.add_player(*n));
        GameSession::new(setup).unwrap()
    }

    fn wins(s: &GameSession) -> Vec<u32> {
        s.players().iter().map(|p| p.wins()).collect()
    }

    #[test]
    fn create_session() {
        let s = session(&["A", "B"], GameMode::Rounds(3));
        assert_eq!(s.current_round(), 1);
        assert_eq!(s.phase(), Phase::AwaitingRound);
        assert!(!s.is_dirty());
        assert!(!s.is_complete());
        assert_eq!(s.next_player().unwrap().name(), "A");
    }

    #[test]
    fn single_maximum_wins() {
        let mut s = session(&["A", "B"], GameMode::Rounds(3));
        let result = s.play_round_with(&[6, 2]).unwrap();
        assert_eq!(result.winner_name(), Some("A"));
        assert_eq!(wins(&s), vec![1, 0]);
    }

    #[test]
    fn shared_maximum_is_a_tie() {
        let mut s = session(&["A", "B", "C"], GameMode::Rounds(3));
        let result = s.play_round_with(&[5, 3, 5]).unwrap();
        assert!(result.outcome.is_tie());
        assert_eq!(wins(&s), vec![0, 0, 0]);
    }

    #[test]
    fn every_roll_scores() {
        let mut s = session(&["A", "B", "C"], GameMode::Rounds(3));
        s.play_round_with(&[5, 3, 5]).unwrap();
        s.play_round_with(&[1, 6, 2]).unwrap();
        let scores: Vec<u32> = s.players().iter().map(|p| p.score()).collect();
        assert_eq!(scores, vec![6, 9, 7]);
        assert_eq!(s.players()[1].history(), &[3, 6]);
    }

    #[test]
    fn round_counter_advances_on_ties_too() {
        let mut s = session(&["A", "B"], GameMode::Rounds(3));
        s.play_round_with(&[4, 4]).unwrap();
        assert_eq!(s.current_round(), 2);
        s.play_round_with(&[1, 4]).unwrap();
        assert_eq!(s.current_round(), 3);
    }

    #[test]
    fn completes_after_last_round() {
        let mut s = session(&["A", "B"], GameMode::Rounds(2));
        s.play_round_with(&[1, 2]).unwrap();
        assert!(!s.is_complete());
        s.play_round_with(&[3, 2]).unwrap();
        assert!(s.is_complete());
        assert_eq!(s.current_round(), 3);
        assert_eq!(s.phase(), Phase::Complete);
        assert!(s.next_player().is_none());
        assert!(matches!(
            s.play_round_with(&[1, 1]),
            Err(GameError::SessionComplete)
        ));
    }

    #[test]
    fn target_mode_completes_on_reaching_target() {
        let mut s = session(&["A", "B"], GameMode::TargetScore(10));
        s.play_round_with(&[6, 5]).unwrap();
        assert!(!s.is_complete());
        s.play_round_with(&[4, 1]).unwrap();
        assert!(s.is_complete());
        assert_eq!(s.standings()[0].name(), "A");
    }

    #[test]
    fn rejects_bad_roll_sets() {
        let mut s = session(&["A", "B"], GameMode::Rounds(2));
        assert!(matches!(
            s.play_round_with(&[1]),
            Err(GameError::RollCountMismatch {
                expected: 2,
                got: 1
            })
        ));
        assert!(matches!(
            s.play_round_with(&[1, 7]),
            Err(GameError::RollOutOfRange { value: 7, sides: 6 })
        ));
        assert!(matches!(
            s.play_round_with(&[0, 1]),
            Err(GameError::RollOutOfRange { value: 0, .. })
        ));
        assert_eq!(s.current_round(), 1);
        assert!(!s.is_dirty());
    }

    #[test]
    fn turns_follow_roster_order() {
        let mut s = session(&["A", "B", "C"], GameMode::Rounds(1));
        let mut rng = StdRng::seed_from_u64(42);

        let first = s.roll_turn(&mut rng).unwrap();
        assert_eq!(first.player, 0);
        assert!(first.result.is_none());
        assert_eq!(s.phase(), Phase::RoundInProgress { next_player: 1 });
        assert_eq!(s.next_player().unwrap().name(), "B");
        assert!(s.ensure_between_rounds().is_err());

        let second = s.roll_turn(&mut rng).unwrap();
        assert_eq!(second.player, 1);
        assert!(second.result.is_none());

        let third = s.roll_turn(&mut rng).unwrap();
        assert_eq!(third.player, 2);
        let result = third.result.unwrap();
        assert_eq!(result.round, 1);
        let values: Vec<u32> = result.rolls.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![first.value, second.value, third.value]);
        assert!(s.is_complete());
    }

    #[test]
    fn mid_round_blocks_scripted_round() {
        let mut s = session(&["A", "B"], GameMode::Rounds(2));
        let mut rng = StdRng::seed_from_u64(1);
        s.roll_turn(&mut rng).unwrap();
        assert!(matches!(
            s.play_round_with(&[1, 2]),
            Err(GameError::RoundInProgress(1))
        ));
    }

    #[test]
    fn play_round_rolls_on_the_die() {
        let setup = GameSetup::default()
            .with_mode(GameMode::Rounds(20))
            .with_die(Die::D4)
            .add_player("A")
            .add_player("B");
        let mut s = GameSession::new(setup).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        while !s.is_complete() {
            let result = s.play_round(&mut rng).unwrap();
            assert!(result.rolls.iter().all(|t| (1..=4).contains(&t.value)));
        }
        assert_eq!(s.players()[0].history().len(), 20);
        assert!(s.is_dirty());
    }

    #[test]
    fn standings_are_stable() {
        let mut s = session(&["A", "B", "C", "D"], GameMode::Rounds(1));
        s.play_round_with(&[3, 5, 5, 3]).unwrap();
        let names: Vec<&str> = s.standings().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn highest_roll_goes_to_first_seat_on_ties() {
        let mut s = session(&["A", "B", "C"], GameMode::Rounds(2));
        assert!(s.highest_roll().is_none());
        s.play_round_with(&[2, 6, 1]).unwrap();
        s.play_round_with(&[3, 1, 6]).unwrap();
        let (player, roll) = s.highest_roll().unwrap();
        assert_eq!(player.name(), "B");
        assert_eq!(roll, 6);
    }

    #[test]
    fn most_consistent_picks_lowest_variance() {
        let mut s = session(&["A", "B"], GameMode::Rounds(2));
        assert!(s.most_consistent().is_none());
        s.play_round_with(&[1, 3]).unwrap();
        s.play_round_with(&[6, 4]).unwrap();
        assert_eq!(s.most_consistent().unwrap().name(), "B");
    }

    #[test]
    fn most_consistent_tie_keeps_first_seat() {
        let mut s = session(&["A", "B"], GameMode::Rounds(2));
        s.play_round_with(&[2, 5]).unwrap();
        s.play_round_with(&[2, 5]).unwrap();
        assert_eq!(s.most_consistent().unwrap().name(), "A");
    }

    #[test]
    fn most_consistent_skips_players_without_rolls() {
        let mut players = vec![Player::new("Empty"), Player::new("Rolled")];
        players[1].add_roll(3);
        players[1].add_score(3);
        players[1].add_roll(5);
        players[1].add_score(5);
        let s = GameSession::restore(GameMode::Rounds(5), Die::D6, players, 3).unwrap();
        assert_eq!(s.most_consistent().unwrap().name(), "Rolled");
        assert_eq!(s.highest_roll().unwrap().0.name(), "Rolled");
    }

    #[test]
    fn rematch_resets_but_keeps_wins() {
        let mut s = session(&["A", "B"], GameMode::Rounds(1));
        s.play_round_with(&[6, 1]).unwrap();
        assert!(s.is_complete());
        s.mark_saved();

        s.rematch();
        assert_eq!(s.current_round(), 1);
        assert!(!s.is_complete());
        assert!(s.is_dirty());
        assert_eq!(s.players()[0].score(), 0);
        assert!(s.players()[0].history().is_empty());
        assert_eq!(wins(&s), vec![1, 0]);
    }

    #[test]
    fn restore_rejects_round_out_of_range() {
        let players = vec![Player::new("A"), Player::new("B")];
        assert!(GameSession::restore(GameMode::Rounds(3), Die::D6, players.clone(), 5).is_err());
        assert!(GameSession::restore(GameMode::Rounds(3), Die::D6, players.clone(), 0).is_err());
        assert!(GameSession::restore(GameMode::Rounds(3), Die::D6, players, 4).is_ok());
    }

    #[test]
    fn mark_saved_clears_dirty() {
        let mut s = session(&["A", "B"], GameMode::Rounds(3));
        s.play_round_with(&[2, 3]).unwrap();
        assert!(s.is_dirty());
        s.mark_saved();
        assert!(!s.is_dirty());
    }
}
