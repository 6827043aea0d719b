//! Line commands read from stdin.

use chess_core::Square;
use chess_ui::{GameMode, ScreenPos};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  <square> | click <square>   click a square, e.g. e2
  at <row> <col>              click a screen cell, row 0 at the top
  flip                        turn the board around
  reset                       start a new game
  hints [on|off]              toggle or set move hints
  mode <pvp|pvc>              two humans, or play black's moves automatically
  show                        redraw the board
  help                        this text
  quit                        exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Click(Square),
    At(ScreenPos),
    Flip,
    Reset,
    /// `None` toggles.
    Hints(Option<bool>),
    Mode(GameMode),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("invalid square: {0}")]
    BadSquare(String),
    #[error("invalid cell, expected `at <row> <col>` with values 0-7")]
    BadCell,
    #[error("expected `hints on` or `hints off`")]
    BadHints,
    #[error("unknown game mode: {0}")]
    BadMode(String),
}

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = words.collect();

        let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("click", [square]) => Command::Click(parse_square(square)?),
            ("at", [row, col]) => {
                let row = row.parse().map_err(|_| CommandError::BadCell)?;
                let col = col.parse().map_err(|_| CommandError::BadCell)?;
                Command::At(ScreenPos::new(row, col).ok_or(CommandError::BadCell)?)
            }
            ("at", _) => return Err(CommandError::BadCell),
            ("flip", []) => Command::Flip,
            ("reset" | "new", []) => Command::Reset,
            ("hints", []) => Command::Hints(None),
            ("hints", ["on"]) => Command::Hints(Some(true)),
            ("hints", ["off"]) => Command::Hints(Some(false)),
            ("hints", _) => return Err(CommandError::BadHints),
            ("mode", [mode]) => Command::Mode(
                mode.parse()
                    .map_err(|_| CommandError::BadMode(mode.to_string()))?,
            ),
            ("show", []) => Command::Show,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            (word, []) if word.len() == 2 => Command::Click(parse_square(word)?),
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(command)
    }
}

fn parse_square(text: &str) -> Result<Square, CommandError> {
    Square::from_algebraic(&text.to_ascii_lowercase())
        .ok_or_else(|| CommandError::BadSquare(text.to_string()))
}
