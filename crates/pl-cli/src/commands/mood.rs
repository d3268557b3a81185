use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::rngs::StdRng;

use pl_mood::{MoodChoice, MoodConfig, MoodEntry, MoodLog, interpret_choice};

use crate::console::Console;

pub fn run(log_file: &Path, config: Option<&Path>, mut rng: StdRng) -> Result<(), String> {
    let config = match config {
        Some(path) => MoodConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => MoodConfig::default(),
    };
    let log = MoodLog::new(log_file);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    menu(&mut console, &config, &log, &mut rng).map_err(|e| e.to_string())
}

pub fn history(log_file: &Path) -> Result<(), String> {
    let log = MoodLog::new(log_file);
    print_history(&mut io::stdout(), &log).map_err(|e| e.to_string())
}

pub fn summary(log_file: &Path) -> Result<(), String> {
    let counts = MoodLog::new(log_file).summary().map_err(|e| e.to_string())?;
    if counts.is_empty() {
        println!("No mood history found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Mood", "Times"]);
    for (mood, count) in &counts {
        table.add_row(vec![mood.clone(), count.to_string()]);
    }
    println!("{table}");
    Ok(())
}

fn menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &MoodConfig,
    log: &MoodLog,
    rng: &mut StdRng,
) -> io::Result<()> {
    loop {
        let out = console.out();
        writeln!(out)?;
        writeln!(out, "{}", "==== Mood Journal ====".bold().cyan())?;
        writeln!(out, "{}", "1. Detect mood and get a suggestion".green())?;
        writeln!(out, "{}", "2. View mood history".yellow())?;
        writeln!(out, "{}", "3. Exit".red())?;

        match console.read_number("Choose an option: ", 1..=3)? {
            None => return Ok(()),
            Some(1) => detect_mood(console, config, log, rng)?,
            Some(2) => print_history(console.out(), log)?,
            _ => {
                writeln!(console.out(), "{}", "Goodbye! Stay positive!".bold().green())?;
                return Ok(());
            }
        }
    }
}

fn detect_mood<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &MoodConfig,
    log: &MoodLog,
    rng: &mut StdRng,
) -> io::Result<()> {
    let moods = config.moods();
    let out = console.out();
    writeln!(out, "\nHow are you feeling today?")?;
    for (i, mood) in moods.iter().enumerate() {
        writeln!(out, "{}. {mood}", i + 1)?;
    }
    writeln!(out, "{}. Other (type your own)", moods.len() + 1)?;

    let Some(input) = console.read_line("Choose a number or type your mood: ")? else {
        return Ok(());
    };
    let mood = match interpret_choice(&input, config) {
        MoodChoice::Listed(mood) | MoodChoice::Typed(mood) => mood,
        MoodChoice::AskForMood => {
            let Some(mood) = console.read_line("Enter your mood: ")? else {
                return Ok(());
            };
            mood
        }
    };

    let suggestion = match config.suggest(&mood, rng) {
        Ok(s) => s,
        Err(e) => {
            writeln!(console.out(), "{}", e.to_string().red())?;
            return Ok(());
        }
    };

    let out = console.out();
    writeln!(
        out,
        "\n{} {}",
        "Suggested activity:".bold(),
        suggestion.activity.green()
    )?;
    writeln!(
        out,
        "{} {}",
        "Motivational quote:".bold(),
        suggestion.quote.italic()
    )?;

    let saved = MoodEntry::today(&suggestion.mood, &suggestion.activity)
        .and_then(|entry| log.append(&entry));
    match saved {
        Ok(()) => writeln!(out, "Your mood and activity have been saved.")?,
        Err(e) => {
            tracing::warn!(error = %e, "mood not saved");
            writeln!(out, "{}", format!("Could not save your mood: {e}").red())?;
        }
    }
    Ok(())
}

fn print_history<W: Write>(out: &mut W, log: &MoodLog) -> io::Result<()> {
    let entries = match log.load() {
        Ok(entries) => entries,
        Err(e) => {
            writeln!(out, "{}", e.to_string().red())?;
            return Ok(());
        }
    };
    if entries.is_empty() {
        return writeln!(out, "No mood history found.");
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Date", "Mood", "Activity"]);
    for entry in &entries {
        table.add_row(vec![
            entry.date.format("%Y-%m-%d").to_string(),
            entry.mood.clone(),
            entry.activity.clone(),
        ]);
    }
    writeln!(out, "{}", "==== Mood History ====".bold().cyan())?;
    writeln!(out, "{table}")
}
