use core::fmt;
use core::ops::{BitOr, Index, IndexMut};
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Dimensions and mine target of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const BEGINNER: Self = Self::new_unchecked(9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked(16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked(16, 30, 99);

    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validated constructor: `rows > 0`, `cols > 0` and `mines < rows * cols`.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            });
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        // 255 * 255 still fits
        self.rows as CellCount * self.cols as CellCount
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (row, col) = coords;
        if row < self.rows && col < self.cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { row, col })
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}

/// The standard presets a menu offers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Beginner => BoardConfig::BEGINNER,
            Self::Intermediate => BoardConfig::INTERMEDIATE,
            Self::Expert => BoardConfig::EXPERT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty {0:?}, expected one of: beginner, intermediate, expert")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDifficulty(s.to_owned()))
    }
}

/// Mine positions of a board, the output of mine placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        // a mask always comes from `Coord2` dimensions, so its count fits
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(row, col) in mine_coords {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::OutOfBounds { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn board_config(&self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig::new_unchecked(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        neighbors(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.mine_mask[(row as usize, col as usize)]
    }
}

/// Result of a toggle-flag call. `counter_delta` is +1 when a flag was placed,
/// -1 when one was removed and 0 when nothing changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagOutcome {
    pub counter_delta: i8,
}

impl FlagOutcome {
    pub const NO_CHANGE: Self = Self { counter_delta: 0 };
    pub const PLACED: Self = Self { counter_delta: 1 };
    pub const REMOVED: Self = Self { counter_delta: -1 };

    pub const fn has_update(self) -> bool {
        self.counter_delta != 0
    }
}

/// Result of a reveal or chord call: the board state afterwards and how many
/// cells were newly revealed by it (mines uncovered on a loss included).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RevealOutcome {
    pub state: GameState,
    pub revealed: CellCount,
}

impl RevealOutcome {
    pub const fn no_change(state: GameState) -> Self {
        Self { state, revealed: 0 }
    }

    pub const fn has_update(self) -> bool {
        self.revealed > 0
    }
}

/// Used to merge outcomes when chording opens several neighbours
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use GameState::*;
        let state = match (self.state, rhs.state) {
            // loss has priority
            (Lost, _) | (_, Lost) => Lost,
            (Won, _) | (_, Won) => Won,
            (Playing, Playing) => Playing,
        };
        RevealOutcome {
            state,
            revealed: self.revealed.saturating_add(rhs.revealed),
        }
    }
}

/// Builds a validated board that has not placed its mines yet.
pub fn create_board(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Board> {
    Board::new(BoardConfig::new(rows, cols, mine_count)?)
}
