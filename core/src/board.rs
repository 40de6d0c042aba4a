use core::ops::{Index, IndexMut};

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cells with fixed dimensions, stored row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Creates a mine-free board with every cell hidden.
    pub fn new(config: GameConfig) -> Self {
        let (columns, rows) = config.size;
        Self {
            cells: Array2::default([usize::from(rows), usize::from(columns)]),
            mine_count: config.mines,
        }
    }

    /// Builds a board with mines at exactly the given coordinates, adjacency included.
    pub fn from_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(GameConfig::new_unchecked(size, 0));
        if board.cells.is_empty() {
            return Err(GameError::EmptyBoard);
        }

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board[coords].is_mine = true;
        }

        board.mine_count = board.cells.iter().filter(|cell| cell.is_mine).count() as CellCount;
        GameConfig::new(size, board.mine_count)?;
        board.compute_adjacency();
        Ok(board)
    }

    /// Clears every cell and scatters `mine_count` mines by rejection sampling.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let total_cells = self.total_cells();
        assert!(
            self.mine_count < total_cells,
            "cannot place {} mines on {} cells",
            self.mine_count,
            total_cells
        );

        self.cells.iter_mut().for_each(Cell::reset);

        let cells = self
            .cells
            .as_slice_mut()
            .expect("layout should be standard");
        let mut mines_placed = 0;
        let mut draws = 0u64;
        while mines_placed < self.mine_count {
            let index = rng.random_range(0..cells.len());
            draws += 1;
            if !cells[index].is_mine {
                cells[index].is_mine = true;
                mines_placed += 1;
            }
        }
        log::debug!(
            "Placed {} mines on {} cells in {} draws",
            mines_placed,
            total_cells,
            draws
        );
    }

    /// Recounts neighbouring mines for every cell, mines get [`MINE_SENTINEL`].
    pub fn compute_adjacency(&mut self) {
        let (columns, rows) = self.size();
        for y in 0..rows {
            for x in 0..columns {
                let coords = (x, y);
                self[coords].adjacent_mines = if self[coords].is_mine {
                    MINE_SENTINEL
                } else {
                    self.count_adjacent_mines(coords)
                };
            }
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// `(columns, rows)`
    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (columns as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_revealed).count() as CellCount
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Every cell with its coordinates, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine)
            .map(|(coords, _)| coords)
            .collect()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    fn count_adjacent_mines(&self, coords: Coord2) -> i8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine)
            .count() as i8
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
