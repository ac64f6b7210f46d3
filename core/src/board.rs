use std::collections::VecDeque;
use core::ops::BitOr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Mines are laid out lazily on the first reveal; this tracks which side of
/// that point a board is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinePhase {
    /// Configured, waiting for the first reveal to seed placement.
    Unplaced { seed: u64 },
    /// Mines are on the board and adjacency counts are final.
    Placed,
}

/// A single game from first click to win or loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    phase: MinePhase,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Board with a random placement seed.
    pub fn new(config: BoardConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// Board whose mine layout is fully determined by `seed` and the first reveal.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        // nothing to place, so the board is fully determined already
        let phase = if config.mines == 0 {
            MinePhase::Placed
        } else {
            MinePhase::Unplaced { seed }
        };

        Ok(Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            phase,
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::Playing,
            triggered_mine: None,
        })
    }

    /// Board with a fixed, already placed layout. The first reveal gets no
    /// protection.
    pub fn with_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.board_config();
        config.validate()?;

        let mut board = Self {
            config,
            cells: Array2::default(config.size().to_nd_index()),
            phase: MinePhase::Placed,
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::Playing,
            triggered_mine: None,
        };
        board.apply_layout(&layout);
        Ok(board)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn phase(&self) -> MinePhase {
        self.phase
    }

    pub fn mines_placed(&self) -> bool {
        matches!(self.phase, MinePhase::Placed)
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn view(&self, coords: Coord2) -> Result<CellView> {
        self.cell(coords).map(Cell::view)
    }

    /// Row-major iterator over every cell with its coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Lays out mines avoiding `start` and its neighbours. Does nothing when
    /// mines are already placed. On failure the board is left untouched.
    pub fn place_mines(&mut self, start: Coord2) -> Result<()> {
        let start = self.config.validate_coords(start)?;

        let MinePhase::Unplaced { seed } = self.phase else {
            log::debug!("Mines already placed, ignoring placement at {:?}", start);
            return Ok(());
        };

        let layout = RandomMineGenerator::new(seed).generate(self.config, start)?;
        self.apply_layout(&layout);
        self.phase = MinePhase::Placed;
        Ok(())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.state.is_finished() {
            return Ok(FlagOutcome::NO_CHANGE);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match cell.state() {
            CellState::Hidden => {
                cell.set_state(CellState::Flagged);
                self.flagged_count += 1;
                FlagOutcome::PLACED
            }
            CellState::Flagged => {
                cell.set_state(CellState::Hidden);
                self.flagged_count -= 1;
                FlagOutcome::REMOVED
            }
            CellState::Revealed => FlagOutcome::NO_CHANGE,
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if self.state.is_finished() || !self.cells[coords.to_nd_index()].is_hidden() {
            return Ok(RevealOutcome::no_change(self.state));
        }

        self.place_mines(coords)?;
        Ok(self.reveal_single_cell(coords))
    }

    /// Opens every unflagged neighbour of a revealed number whose flag count
    /// matches it. Anything else is a no-op.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        if !self.can_chord_at(coords) {
            return Ok(RevealOutcome::no_change(self.state));
        }

        let unchanged = RevealOutcome::no_change(self.state);
        // after a loss every unflagged mine is already uncovered, so the
        // remaining neighbours only open safe cells
        Ok(neighbors(coords, self.size())
            .map(|neighbor| self.reveal_single_cell(neighbor))
            .fold(unchanged, BitOr::bitor))
    }

    /// Whether chording at `coords` would do anything.
    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        if self.state.is_finished() {
            return false;
        }

        let Ok(cell) = self.cell(coords) else {
            return false;
        };

        let count = cell.adjacent_mine_count();
        cell.is_revealed() && count > 0 && count == self.count_flagged_neighbors(coords)
    }

    /// Reveals a hidden cell, flood filling from blank ones. Flagged or
    /// revealed cells are left alone.
    fn reveal_single_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return RevealOutcome::no_change(self.state);
        }

        if cell.is_mine() {
            self.triggered_mine = Some(coords);
            let revealed = self.reveal_mines();
            self.end_game(false);
            return RevealOutcome {
                state: self.state,
                revealed,
            };
        }

        self.open_safe_cell(coords);
        let mut revealed: CellCount = 1;

        if cell.adjacent_mine_count() == 0 {
            let mut to_visit: VecDeque<_> = self.hidden_neighbors(coords).collect();
            log::trace!(
                "Starting flood-fill from {:?}, initial neighbors: {:?}",
                coords,
                to_visit
            );

            while let Some(visit_coords) = to_visit.pop_front() {
                // queued more than once, or flagged since
                if !self.cells[visit_coords.to_nd_index()].is_hidden() {
                    continue;
                }

                self.open_safe_cell(visit_coords);
                revealed += 1;
                let visit_count = self.cells[visit_coords.to_nd_index()].adjacent_mine_count();
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    visit_coords,
                    visit_count
                );

                // if this is also blank we visit the neighbors
                if visit_count == 0 {
                    to_visit.extend(self.hidden_neighbors(visit_coords));
                }
            }
        }

        if self.revealed_count == self.config.safe_cells() {
            self.end_game(true);
        }

        RevealOutcome {
            state: self.state,
            revealed,
        }
    }

    fn open_safe_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        debug_assert!(!cell.is_mine());
        cell.set_state(CellState::Revealed);
        self.revealed_count += 1;
    }

    /// Uncovers every unflagged mine, flags stay in place.
    fn reveal_mines(&mut self) -> CellCount {
        let mut revealed = 0;
        for cell in self.cells.iter_mut() {
            if cell.is_mine() && cell.is_hidden() {
                cell.set_state(CellState::Revealed);
                revealed += 1;
            }
        }
        revealed
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        if won {
            self.triggered_mine = None;
        }
        log::debug!(
            "Game ended: {:?}, {} of {} safe cells revealed",
            self.state,
            self.revealed_count,
            self.config.safe_cells()
        );
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            cell.set_mine(layout.contains_mine(coords));
            cell.set_adjacent_mines(layout.adjacent_mine_count(coords));
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        neighbors(coords, self.size()).filter(|&pos| self.cells[pos.to_nd_index()].is_hidden())
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        neighbors(coords, self.size())
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count() as u8
    }
}
