use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::rngs::StdRng;

use pl_game::{Die, GameMode, GameSession, GameSetup, RoundResult};

use crate::console::Console;

const HOW_TO_PLAY: &str = "\
How to play:
  - 2 to 4 players take turns rolling the same die, in seat order.
  - Every roll is added to the roller's score, win or lose.
  - The highest roll wins the round. If two or more players share the
    highest roll, the round is a tie and nobody gets the win.
  - Play a fixed number of rounds, or race to a target score.
  - The highest total score at the end takes first place.
  - Save at any time between rounds and load it later from the main menu.";

pub fn run(save_path: &Path, mut rng: StdRng) -> Result<(), String> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    DiceApp::new(save_path)
        .run(&mut console, &mut rng)
        .map_err(|e| e.to_string())
}

/// Print a summary of a save file without starting a game.
pub fn inspect(save_path: &Path) -> Result<(), String> {
    let session = pl_game::load_from_path(save_path)
        .map_err(|e| format!("cannot load {}: {e}", save_path.display()))?;

    println!("  {} {}", "Saved game".bold(), save_path.display());
    println!(
        "  Mode: {} | Die: {} | {}",
        session.mode(),
        session.die(),
        round_label(&session)
    );
    println!();
    println!("{}", scoreboard(&session));
    Ok(())
}

/// The dice game front-end: the save location and the session in play.
pub struct DiceApp {
    save_path: PathBuf,
    session: Option<GameSession>,
}

impl DiceApp {
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            session: None,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Load the save file. On failure the current session is left as it was
    /// and `false` is returned.
    pub fn load<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        match pl_game::load_from_path(&self.save_path) {
            Ok(session) => {
                writeln!(
                    out,
                    "{}",
                    format!("Game loaded from {}.", self.save_path.display()).green()
                )?;
                self.session = Some(session);
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(path = %self.save_path.display(), error = %e, "load failed");
                writeln!(
                    out,
                    "{}",
                    format!("Could not load {}: {e}", self.save_path.display()).red()
                )?;
                Ok(false)
            }
        }
    }

    /// Save the current session. Returns whether it was written.
    pub fn save<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        let Some(session) = self.session.as_mut() else {
            writeln!(out, "{}", "There is no game to save.".yellow())?;
            return Ok(false);
        };
        match pl_game::save_to_path(session, &self.save_path) {
            Ok(()) => {
                session.mark_saved();
                writeln!(
                    out,
                    "{}",
                    format!("Game saved to {}.", self.save_path.display()).green()
                )?;
                Ok(true)
            }
            Err(e) => {
                writeln!(
                    out,
                    "{}",
                    format!("Could not save {}: {e}", self.save_path.display()).red()
                )?;
                Ok(false)
            }
        }
    }

    /// Main menu loop.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        rng: &mut StdRng,
    ) -> io::Result<()> {
        print_banner(console.out())?;
        loop {
            let out = console.out();
            writeln!(out)?;
            writeln!(out, "{}", "==== Dice Game Menu ====".bold().cyan())?;
            writeln!(out, "{}", "1. New game".green())?;
            writeln!(out, "{}", "2. Load game".yellow())?;
            writeln!(out, "{}", "3. How to play".blue())?;
            writeln!(out, "{}", "4. Exit".red())?;

            match console.read_number("Choose an option: ", 1..=4)? {
                None => return Ok(()),
                Some(1) => {
                    if let Some(session) = setup_game(console)? {
                        self.session = Some(session);
                        self.play(console, rng)?;
                    }
                }
                Some(2) => {
                    if self.load(console.out())? {
                        self.play(console, rng)?;
                    }
                }
                Some(3) => writeln!(console.out(), "\n{HOW_TO_PLAY}")?,
                _ => {
                    writeln!(console.out(), "{}", "Thanks for playing!".bold().green())?;
                    return Ok(());
                }
            }
        }
    }

    /// Game menu loop for the current session.
    fn play<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        rng: &mut StdRng,
    ) -> io::Result<()> {
        loop {
            let Some(session) = self.session.as_mut() else {
                return Ok(());
            };

            if session.is_complete() {
                print_final_results(console.out(), session)?;
                match console.confirm("Play again with the same players? (y/n): ")? {
                    Some(true) => {
                        session.rematch();
                        continue;
                    }
                    Some(false) => return self.offer_save(console),
                    None => return Ok(()),
                }
            }

            let out = console.out();
            writeln!(out)?;
            writeln!(
                out,
                "{} {}",
                "==== Game Menu ====".bold().cyan(),
                round_label(session).dimmed()
            )?;
            writeln!(out, "{}", "1. Play round".green())?;
            writeln!(out, "{}", "2. Scoreboard".yellow())?;
            writeln!(out, "{}", "3. Save game".blue())?;
            writeln!(out, "{}", "4. Quit to main menu".red())?;

            match console.read_number("Choose an option: ", 1..=4)? {
                None => return Ok(()),
                Some(1) => play_round(console.out(), session, rng)?,
                Some(2) => writeln!(console.out(), "{}", scoreboard(session))?,
                Some(3) => {
                    self.save(console.out())?;
                }
                _ => return self.offer_save(console),
            }
        }
    }

    fn offer_save<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> io::Result<()> {
        let dirty = self.session.as_ref().is_some_and(GameSession::is_dirty);
        if dirty && console.confirm("Save before leaving? (y/n): ")? == Some(true) {
            self.save(console.out())?;
        }
        Ok(())
    }
}

fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(40).magenta().bold())?;
    writeln!(out, "{}", "          Parlour Dice Game".yellow().bold())?;
    writeln!(out, "{}", "=".repeat(40).magenta().bold())
}

fn setup_game<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> io::Result<Option<GameSession>> {
    writeln!(console.out(), "\n{}", "--- New Game ---".bold().blue())?;
    writeln!(console.out(), "1. Fixed number of rounds")?;
    writeln!(console.out(), "2. First to a target score")?;
    let Some(mode) = console.read_number("Game mode: ", 1..=2)? else {
        return Ok(None);
    };
    let mode = if mode == 1 {
        let Some(n) = console.read_number("Number of rounds (1-100): ", 1..=100)? else {
            return Ok(None);
        };
        GameMode::Rounds(n)
    } else {
        let Some(n) = console.read_number("Target score (10-1000): ", 10..=1000)? else {
            return Ok(None);
        };
        GameMode::TargetScore(n)
    };

    let Some(count) = console.read_number("Number of players (2-4): ", 2..=4)? else {
        return Ok(None);
    };
    let mut setup = GameSetup::default().with_mode(mode);
    for seat in 1..=count {
        let prompt = format!("Name for player {seat} (blank for Player {seat}): ");
        let Some(name) = console.read_line(&prompt)? else {
            return Ok(None);
        };
        setup = setup.add_player(name);
    }

    let Some(sides) = console.read_number("Die faces (4-12): ", 4..=12)? else {
        return Ok(None);
    };
    let die = match Die::from_sides(sides) {
        Ok(die) => die,
        Err(e) => {
            writeln!(console.out(), "{}", e.to_string().red())?;
            return Ok(None);
        }
    };

    match GameSession::new(setup.with_die(die)) {
        Ok(session) => {
            writeln!(
                console.out(),
                "{}",
                format!(
                    "Starting a {} game with {} players on a {}.",
                    session.mode(),
                    session.players().len(),
                    session.die()
                )
                .green()
            )?;
            Ok(Some(session))
        }
        Err(e) => {
            writeln!(console.out(), "{}", e.to_string().red())?;
            Ok(None)
        }
    }
}

fn play_round<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rng: &mut StdRng,
) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        format!("--- Round {} ---", session.current_round()).bold().blue()
    )?;
    let result = loop {
        let turn = match session.roll_turn(rng) {
            Ok(turn) => turn,
            Err(e) => {
                writeln!(out, "{}", e.to_string().red())?;
                return Ok(());
            }
        };
        writeln!(
            out,
            "  {} rolls a {}",
            session.players()[turn.player].name(),
            turn.value.to_string().bold()
        )?;
        if let Some(result) = turn.result {
            break result;
        }
    };
    print_round_result(out, &result)
}

fn print_round_result<W: Write>(out: &mut W, result: &RoundResult) -> io::Result<()> {
    match result.winner_name() {
        Some(name) => writeln!(
            out,
            "{}",
            format!("{name} wins round {} with a {}!", result.round, result.outcome.top_roll())
                .green()
                .bold()
        ),
        None => writeln!(
            out,
            "{}",
            format!(
                "Round {} is a tie at {}. No winner this round.",
                result.round,
                result.outcome.top_roll()
            )
            .yellow()
        ),
    }
}

fn round_label(session: &GameSession) -> String {
    match session.mode() {
        _ if session.is_complete() => "(game over)".to_string(),
        GameMode::Rounds(n) => format!("(round {} of {n})", session.current_round()),
        GameMode::TargetScore(t) => {
            format!("(round {}, first to {t})", session.current_round())
        }
    }
}

fn scoreboard(session: &GameSession) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Player", "Score", "Wins", "Best", "Average", "Rolls"]);
    for p in session.players() {
        let rolls: Vec<String> = p.history().iter().map(u32::to_string).collect();
        let rolls = if rolls.is_empty() {
            "-".to_string()
        } else {
            rolls.join(" ")
        };
        table.add_row(vec![
            p.name().to_string(),
            p.score().to_string(),
            p.wins().to_string(),
            p.best_roll().to_string(),
            format!("{:.2}", p.average_roll()),
            rolls,
        ]);
    }
    table
}

fn print_final_results<W: Write>(out: &mut W, session: &GameSession) -> io::Result<()> {
    writeln!(out, "\n{}", "==== Final Results ====".bold().magenta())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Player", "Score", "Wins"]);
    for (rank, p) in session.standings().iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            p.name().to_string(),
            p.score().to_string(),
            p.wins().to_string(),
        ]);
    }
    writeln!(out, "{table}")?;

    if let Some(leader) = session.standings().first() {
        writeln!(
            out,
            "{}",
            format!("{} takes first place!", leader.name()).green().bold()
        )?;
    }
    if let Some((player, roll)) = session.highest_roll() {
        writeln!(out, "Highest roll: {} with a {roll}", player.name())?;
    }
    if let Some(player) = session.most_consistent() {
        writeln!(
            out,
            "Most consistent: {} (variance {:.2})",
            player.name(),
            player.variance().unwrap_or(0.0)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn sample_session() -> GameSession {
        let setup = GameSetup::default()
            .with_mode(GameMode::Rounds(3))
            .add_player("Ada")
            .add_player("Grace");
        let mut s = GameSession::new(setup).unwrap();
        s.play_round_with(&[6, 2]).unwrap();
        s
    }

    fn run_app(app: &mut DiceApp, input: &str) -> String {
        let mut console = Console::new(input.as_bytes(), Vec::new());
        app.run(&mut console, &mut StdRng::seed_from_u64(1)).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn failed_load_keeps_session() {
        let dir = TempDir::new().unwrap();
        let mut app = DiceApp::new(dir.path().join("missing.sav"));
        app.session = Some(sample_session());

        let mut out = Vec::new();
        assert!(!app.load(&mut out).unwrap());

        let s = app.session().unwrap();
        assert_eq!(s.current_round(), 2);
        assert_eq!(s.players()[0].score(), 6);
        assert_eq!(s.players()[0].wins(), 1);
        assert!(String::from_utf8(out).unwrap().contains("Could not load"));
    }

    #[test]
    fn failed_load_without_session() {
        let dir = TempDir::new().unwrap();
        let mut app = DiceApp::new(dir.path().join("missing.sav"));
        let mut out = Vec::new();
        assert!(!app.load(&mut out).unwrap());
        assert!(app.session().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.sav");
        let mut app = DiceApp::new(&path);
        app.session = Some(sample_session());
        let mut out = Vec::new();
        assert!(app.save(&mut out).unwrap());
        assert!(!app.session().unwrap().is_dirty());

        let mut other = DiceApp::new(&path);
        assert!(other.load(&mut out).unwrap());
        assert_eq!(other.session().unwrap().players()[0].history(), &[6]);
    }

    #[test]
    fn save_without_session() {
        let dir = TempDir::new().unwrap();
        let mut app = DiceApp::new(dir.path().join("game.sav"));
        let mut out = Vec::new();
        assert!(!app.save(&mut out).unwrap());
    }

    #[test]
    fn save_failure_keeps_dirty() {
        let dir = TempDir::new().unwrap();
        let mut app = DiceApp::new(dir.path().join("no").join("such").join("game.sav"));
        app.session = Some(sample_session());
        let mut out = Vec::new();
        assert!(!app.save(&mut out).unwrap());
        assert!(app.session().unwrap().is_dirty());
    }

    #[test]
    fn scoreboard_lists_players() {
        let table = scoreboard(&sample_session()).to_string();
        assert!(table.contains("Ada"));
        assert!(table.contains("Grace"));
        assert!(table.contains("6.00"));
    }

    #[test]
    fn final_results_name_the_leader() {
        let mut s = sample_session();
        s.play_round_with(&[1, 5]).unwrap();
        s.play_round_with(&[3, 3]).unwrap();
        let mut out = Vec::new();
        print_final_results(&mut out, &s).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Ada takes first place!"));
        assert!(out.contains("Highest roll: Ada with a 6"));
        assert!(out.contains("Most consistent: Grace"));
    }

    #[test]
    fn menu_plays_a_full_game() {
        let dir = TempDir::new().unwrap();
        let mut app = DiceApp::new(dir.path().join("game.sav"));
        // new game, 2 rounds, 2 players, d6, play twice, decline rematch and save
        let out = run_app(&mut app, "1\n1\n2\n2\nAda\n\n6\n1\n1\nn\nn\n4\n");
        assert!(out.contains("--- Round 1 ---"));
        assert!(out.contains("--- Round 2 ---"));
        assert!(out.contains("Ada rolls a"));
        assert!(out.contains("Player 2 rolls a"));
        assert!(out.contains("Final Results"));
        assert!(out.contains("Thanks for playing!"));
        assert!(app.session().unwrap().is_complete());
        assert!(!dir.path().join("game.sav").exists());
    }

    #[test]
    fn menu_load_missing_file_returns_to_menu() {
        let dir = TempDir::new().unwrap();
        let mut app = DiceApp::new(dir.path().join("missing.sav"));
        let out = run_app(&mut app, "2\n4\n");
        assert!(out.contains("Could not load"));
        assert_eq!(out.matches("==== Dice Game Menu ====").count(), 2);
        assert!(app.session().is_none());
    }

    #[test]
    fn quitting_dirty_game_offers_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.sav");
        let mut app = DiceApp::new(&path);
        let out = run_app(&mut app, "1\n1\n3\n2\nA\nB\n6\n1\n4\ny\n4\n");
        assert!(out.contains("Save before leaving?"));
        assert!(out.contains("Game saved to"));
        let saved = pl_game::load_from_path(&path).unwrap();
        assert_eq!(saved.current_round(), 2);
    }

    #[test]
    fn how_to_play_is_shown() {
        let mut app = DiceApp::new("unused.sav");
        let out = run_app(&mut app, "3\n4\n");
        assert!(out.contains("How to play:"));
    }

    #[test]
    fn round_labels() {
        let s = sample_session();
        assert_eq!(round_label(&s), "(round 2 of 3)");
    }
}
