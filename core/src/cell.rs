use serde::{Deserialize, Serialize};

/// Adjacency sentinel stored on mine cells.
pub const MINE_SENTINEL: i8 = -1;

/// One grid position with its mine, flag, and reveal state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_flagged: bool,
    pub is_revealed: bool,
    /// Mines among the Moore neighbours, or [`MINE_SENTINEL`] for a mine.
    pub adjacent_mines: i8,
}

impl Cell {
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed
    }

    /// Whether revealing this cell continues the cascade into its neighbours.
    pub const fn is_empty(self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Logical state of a cell as a presentation layer should show it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    /// Board contents are hidden because the game is paused.
    Covered,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::Covered)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell {
                is_revealed: true,
                is_mine: true,
                ..
            } => Self::Mine,
            Cell {
                is_revealed: true,
                adjacent_mines,
                ..
            } => Self::Revealed(adjacent_mines.max(0) as u8),
            Cell {
                is_flagged: true, ..
            } => Self::Flagged,
            _ => Self::Hidden,
        }
    }
}
