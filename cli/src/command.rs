use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

pub const USAGE: &str = "\
Commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  c ROW COL   chord a revealed number
  n           start a new game
  h           show this help
  q           quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    New,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}")]
    Unknown(String),
    #[error("Expected `{0} ROW COL`")]
    MissingCoords(&'static str),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected argument {0:?}")]
    TrailingInput(String),
}

fn parse_coord(word: &str) -> Result<Coord, ParseCommandError> {
    word.parse()
        .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or(ParseCommandError::Empty)?;

        let (verb, with_coords): (&'static str, fn(Coord2) -> Command) =
            match name.to_ascii_lowercase().as_str() {
                "r" | "reveal" => ("reveal", Command::Reveal),
                "f" | "flag" => ("flag", Command::Flag),
                "c" | "chord" => ("chord", Command::Chord),
                "n" | "new" => return expect_end(words, Command::New),
                "h" | "help" | "?" => return expect_end(words, Command::Help),
                "q" | "quit" | "exit" => return expect_end(words, Command::Quit),
                _ => return Err(ParseCommandError::Unknown(name.to_owned())),
            };

        let (Some(row), Some(col)) = (words.next(), words.next()) else {
            return Err(ParseCommandError::MissingCoords(verb));
        };
        let coords = (parse_coord(row)?, parse_coord(col)?);
        expect_end(words, with_coords(coords))
    }
}

fn expect_end<'a>(
    mut rest: impl Iterator<Item = &'a str>,
    command: Command,
) -> Result<Command, ParseCommandError> {
    match rest.next() {
        Some(extra) => Err(ParseCommandError::TrailingInput(extra.to_owned())),
        None => Ok(command),
    }
}
