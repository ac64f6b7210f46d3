use std::fmt;

use minefield_core::{Board, CellView, GameState};

fn glyph(view: CellView, triggered: bool) -> char {
    use CellView::*;
    match view {
        Covered => '#',
        Flagged => 'F',
        Mine if triggered => 'X',
        Mine => '*',
        Number(0) => '.',
        Number(count) => char::from(b'0' + count),
    }
}

fn state_label(state: GameState) -> &'static str {
    match state {
        GameState::Playing => "playing",
        GameState::Won => "won",
        GameState::Lost => "lost",
    }
}

/// Text picture of the board with a status line and row/column indices.
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let cols = board.cols();
        writeln!(
            f,
            "mines left: {}  state: {}",
            board.mines_left(),
            state_label(board.state())
        )?;

        write!(f, "   ")?;
        for col in 0..cols {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;

        let triggered = board.triggered_mine();
        for (coords, cell) in board.iter_cells() {
            let (row, col) = coords;
            if col == 0 {
                write!(f, "{row:>3}")?;
            }
            write!(f, "{:>3}", glyph(cell.view(), triggered == Some(coords)))?;
            if col + 1 == cols {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
