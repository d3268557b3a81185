//! CLI frontend for the Parlour dice game and mood journal.

mod commands;
mod console;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "parlour",
    about = "Parlour: a dice game for 2 to 4 players and a daily mood journal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the dice game interactively
    Dice {
        #[command(subcommand)]
        action: Option<DiceAction>,

        /// Save file used by the save and load menu entries
        #[arg(short, long, default_value = "dice_game.sav", global = true)]
        save_file: PathBuf,

        /// RNG seed for reproducible rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Record today's mood and get an activity suggestion
    Mood {
        #[command(subcommand)]
        action: Option<MoodAction>,

        /// Mood history file
        #[arg(short, long, default_value = pl_mood::log::DEFAULT_LOG_FILE, global = true)]
        log_file: PathBuf,

        /// JSON file with custom activities and quotes
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed for reproducible suggestions
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum DiceAction {
    /// Show the contents of a save file
    Inspect,
}

#[derive(Subcommand)]
enum MoodAction {
    /// List every recorded mood
    History,
    /// Count recorded moods, most frequent first
    Summary,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Dice {
            action: Some(DiceAction::Inspect),
            save_file,
            ..
        } => commands::dice::inspect(&save_file),
        Commands::Dice {
            action: None,
            save_file,
            seed,
        } => commands::dice::run(&save_file, commands::make_rng(seed)),
        Commands::Mood {
            action: Some(MoodAction::History),
            log_file,
            ..
        } => commands::mood::history(&log_file),
        Commands::Mood {
            action: Some(MoodAction::Summary),
            log_file,
            ..
        } => commands::mood::summary(&log_file),
        Commands::Mood {
            action: None,
            log_file,
            config,
            seed,
        } => commands::mood::run(&log_file, config.as_deref(), commands::make_rng(seed)),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
