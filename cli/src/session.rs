use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use minefield_core::{Board, GameState};

use crate::command::{Command, USAGE};
use crate::render::BoardView;
use crate::settings::GameSetup;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Help,
    Quit,
}

/// Drives one board at a time from typed commands, replacing it on `new`.
#[derive(Debug)]
pub struct Session {
    setup: GameSetup,
    board: Board,
}

impl Session {
    pub fn new(setup: GameSetup) -> minefield_core::Result<Self> {
        let board = Self::fresh_board(setup)?;
        Ok(Self { setup, board })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn fresh_board(setup: GameSetup) -> minefield_core::Result<Board> {
        match setup.seed {
            Some(seed) => Board::with_seed(setup.config, seed),
            None => Board::new(setup.config),
        }
    }

    fn apply(&mut self, command: Command) -> minefield_core::Result<Flow> {
        match command {
            Command::Reveal(coords) => {
                let outcome = self.board.reveal(coords)?;
                log::debug!("reveal {:?}: {:?}", coords, outcome);
            }
            Command::Flag(coords) => {
                let outcome = self.board.toggle_flag(coords)?;
                log::debug!("flag {:?}: {:?}", coords, outcome);
            }
            Command::Chord(coords) => {
                let outcome = self.board.chord(coords)?;
                log::debug!("chord {:?}: {:?}", coords, outcome);
            }
            Command::New => {
                self.board = Self::fresh_board(self.setup)?;
                log::info!("New game: {:?}", self.setup.config);
            }
            Command::Help => return Ok(Flow::Help),
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Reads commands until `quit` or end of input, printing the board after each.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        write!(output, "{}", BoardView(&self.board))?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}. Type `help` for usage.")?;
                    continue;
                }
            };

            match self.apply(command) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Help) => {
                    writeln!(output, "{USAGE}")?;
                    continue;
                }
                Ok(Flow::Continue) => {}
                Err(err) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
            }

            write!(output, "{}", BoardView(&self.board))?;
            match self.board.state() {
                GameState::Playing => {}
                GameState::Won => writeln!(output, "You win! Type `new` to play again.")?,
                GameState::Lost => writeln!(output, "Boom. Type `new` to play again.")?,
            }
        }

        output.flush()?;
        Ok(())
    }
}
