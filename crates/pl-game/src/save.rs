//! Binary save files.
//!
//! A session is written as two bincode records, a header and the game
//! itself. Integers are fixed-width little-endian and strings and lists carry
//! a `u64` length, so a save moves between machines unchanged:
//!
//! ```text
//! magic         4 bytes  "PLDG"
//! version       u32
//! mode          u8       0 = rounds, 1 = target score
//! rounds        i32      round count or target score
//! current_round i32
//! dice_sides    i32
//! player_count  u64
//! per player:
//!   name_len    u64
//!   name        name_len bytes of UTF-8
//!   score       i32
//!   wins        i32
//!   history_len u64
//!   rolls       history_len x i32
//! ```
//!
//! Best and average roll are not stored. Loading replays each roll through
//! the player model so derived stats are rebuilt from the raw history.

use std::fs;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use bincode::Options;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GameMode;
use crate::dice::Die;
use crate::error::{SaveError, SaveResult};
use crate::player::Player;
use crate::session::GameSession;

/// File signature.
pub const MAGIC: &[u8; 4] = b"PLDG";
/// Format version written by this build.
pub const FORMAT_VERSION: u32 = 1;

const MODE_ROUNDS: u8 = 0;
const MODE_TARGET: u8 = 1;
const MAX_NAME_LEN: usize = 1024;
const MAX_HISTORY_LEN: usize = 1 << 20;
const MAX_RECORD_BYTES: u64 = 1 << 26;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct SaveRecord {
    mode: u8,
    rounds: i32,
    current_round: i32,
    dice_sides: i32,
    players: Vec<PlayerRecord>,
}

#[derive(Serialize, Deserialize)]
struct PlayerRecord {
    name: String,
    score: i32,
    wins: i32,
    rolls: Vec<i32>,
}

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_RECORD_BYTES)
}

fn codec_error(e: bincode::Error) -> SaveError {
    match *e {
        bincode::ErrorKind::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            SaveError::Truncated
        }
        bincode::ErrorKind::Io(e) => SaveError::Io(e),
        bincode::ErrorKind::SizeLimit => {
            SaveError::Corrupt(format!("record exceeds {MAX_RECORD_BYTES} bytes"))
        }
        bincode::ErrorKind::InvalidUtf8Encoding(_) => {
            SaveError::Corrupt("player name is not valid UTF-8".to_string())
        }
        other => SaveError::Corrupt(other.to_string()),
    }
}

/// Encode a session into `w`. Nothing is written if the session cannot be
/// saved.
pub fn write_session<W: Write>(w: &mut W, session: &GameSession) -> SaveResult<()> {
    let record = SaveRecord::from_session(session)?;
    let header = Header {
        magic: *MAGIC,
        version: FORMAT_VERSION,
    };
    codec().serialize_into(&mut *w, &header).map_err(codec_error)?;
    codec().serialize_into(&mut *w, &record).map_err(codec_error)?;
    Ok(())
}

/// Decode a session from `r`.
pub fn read_session<R: Read>(r: &mut R) -> SaveResult<GameSession> {
    let header: Header = codec().deserialize_from(&mut *r).map_err(codec_error)?;
    if header.magic != *MAGIC {
        return Err(SaveError::BadMagic);
    }
    if header.version != FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion(header.version));
    }

    let record: SaveRecord = codec().deserialize_from(&mut *r).map_err(codec_error)?;
    let session = record.into_session()?;
    debug!(
        round = session.current_round(),
        players = session.players().len(),
        "session decoded"
    );
    Ok(session)
}

impl SaveRecord {
    fn from_session(session: &GameSession) -> SaveResult<Self> {
        session
            .ensure_between_rounds()
            .map_err(SaveError::Refused)?;

        let mode = match session.mode() {
            GameMode::Rounds(_) => MODE_ROUNDS,
            GameMode::TargetScore(_) => MODE_TARGET,
        };
        let players = session
            .players()
            .iter()
            .map(|p| -> SaveResult<PlayerRecord> {
                Ok(PlayerRecord {
                    name: p.name().to_string(),
                    score: fixed(p.score(), "score")?,
                    wins: fixed(p.wins(), "win count")?,
                    rolls: p
                        .history()
                        .iter()
                        .map(|&roll| fixed(roll, "roll"))
                        .collect::<SaveResult<_>>()?,
                })
            })
            .collect::<SaveResult<_>>()?;

        Ok(Self {
            mode,
            rounds: fixed(session.mode().limit(), "round count")?,
            current_round: fixed(session.current_round(), "round counter")?,
            dice_sides: fixed(session.die().sides(), "dice sides")?,
            players,
        })
    }

    fn into_session(self) -> SaveResult<GameSession> {
        let limit = non_negative(self.rounds, "round count")?;
        let mode = match self.mode {
            MODE_ROUNDS => GameMode::Rounds(limit),
            MODE_TARGET => GameMode::TargetScore(limit),
            other => return Err(SaveError::Corrupt(format!("unknown game mode {other}"))),
        };
        let current_round = non_negative(self.current_round, "round counter")?;
        let die = Die::from_sides(non_negative(self.dice_sides, "dice sides")?)?;

        let players = self
            .players
            .into_iter()
            .map(|p| p.into_player(die))
            .collect::<SaveResult<Vec<_>>>()?;
        Ok(GameSession::restore(mode, die, players, current_round)?)
    }
}

impl PlayerRecord {
    /// Replay the stored rolls so derived stats are rebuilt, then check the
    /// stored score against the replay.
    fn into_player(self, die: Die) -> SaveResult<Player> {
        if self.name.len() > MAX_NAME_LEN {
            return Err(SaveError::Corrupt(format!(
                "name length {} exceeds {MAX_NAME_LEN}",
                self.name.len()
            )));
        }
        if self.rolls.len() > MAX_HISTORY_LEN {
            return Err(SaveError::Corrupt(format!(
                "history length {} exceeds {MAX_HISTORY_LEN}",
                self.rolls.len()
            )));
        }
        let score = non_negative(self.score, "score")?;
        let wins = non_negative(self.wins, "win count")?;

        let mut player = Player::new(self.name);
        for roll in self.rolls {
            let roll = non_negative(roll, "roll")?;
            if !die.contains(roll) {
                return Err(SaveError::Corrupt(format!("roll {roll} is not on a {die}")));
            }
            player.add_roll(roll);
            player.add_score(roll);
        }
        if player.score() != score {
            return Err(SaveError::Corrupt(format!(
                "{} has score {score} but rolled {}",
                player.name(),
                player.score()
            )));
        }
        player.set_wins(wins);
        Ok(player)
    }
}

/// Write a session to `path`, replacing any existing file. The file is only
/// touched once the whole record has been encoded.
pub fn save_to_path(session: &GameSession, path: &Path) -> SaveResult<()> {
    let mut bytes = Vec::new();
    write_session(&mut bytes, session)?;
    fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "game saved");
    Ok(())
}

/// Read a session from `path`.
pub fn load_from_path(path: &Path) -> SaveResult<GameSession> {
    let file = fs::File::open(path)?;
    let mut r = BufReader::new(file);
    let session = read_session(&mut r)?;
    debug!(path = %path.display(), "game loaded");
    Ok(session)
}

fn fixed(value: u32, field: &'static str) -> SaveResult<i32> {
    i32::try_from(value).map_err(|_| SaveError::Overflow(field))
}

fn non_negative(value: i32, field: &str) -> SaveResult<u32> {
    u32::try_from(value).map_err(|_| SaveError::Corrupt(format!("negative {field}: {value}")))
}
