use serde::{Deserialize, Serialize};

/// Cover state of a cell. A single enum keeps "flagged" and "revealed"
/// mutually exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// One grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    adjacent_mines: u8,
    state: CellState,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    /// Number of mines among the in-bounds neighbours, only meaningful once mines are placed.
    pub const fn adjacent_mine_count(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(self) -> CellState {
        self.state
    }

    /// What the player gets to see of this cell.
    pub const fn view(self) -> CellView {
        match (self.state, self.mine) {
            (CellState::Hidden, _) => CellView::Covered,
            (CellState::Flagged, _) => CellView::Flagged,
            (CellState::Revealed, true) => CellView::Mine,
            (CellState::Revealed, false) => CellView::Number(self.adjacent_mines),
        }
    }

    pub(crate) fn set_mine(&mut self, mine: bool) {
        self.mine = mine;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// Player-visible state used by a UI to paint a cell after any mutating call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Covered,
    Flagged,
    Number(u8),
    Mine,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Covered
    }
}
