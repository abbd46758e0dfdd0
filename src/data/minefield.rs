use std::fmt::{self, Write};

use crate::{data::Cell, error::GameError};

/// Offsets scanned in row-major order so neighbor queries are deterministic
/// for a given board size.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The board: exactly `rows * cols` cells in row-major order. The collection
/// is fixed at construction; individual cell state changes only through
/// [`crate::logic::Game`].
#[derive(Debug)]
pub struct Minefield {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Minefield {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(row, col));
            }
        }

        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read-only view of all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, GameError> {
        self.index(row, col).map(|index| &self.cells[index])
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell, GameError> {
        self.index(row, col).map(|index| &mut self.cells[index])
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GameError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GameError::CoordinateOutOfRange { row, col })
        }
    }

    /// In-bounds coordinates adjacent to `(row, col)`, in row-major order.
    pub fn neighbor_positions(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(row_delta, col_delta)| {
                let neighbor_row = row.checked_add_signed(row_delta)?;
                let neighbor_col = col.checked_add_signed(col_delta)?;
                (neighbor_row < self.rows && neighbor_col < self.cols)
                    .then_some((neighbor_row, neighbor_col))
            })
            .collect()
    }

    /// All cells adjacent to the given cell: 3 for a corner, 5 for an edge,
    /// 8 for an interior cell, none on a 1x1 board.
    pub fn neighbors(&self, cell: &Cell) -> Vec<&Cell> {
        self.neighbor_positions(cell.row(), cell.col())
            .into_iter()
            .map(|(row, col)| &self.cells[row * self.cols + col])
            .collect()
    }

    /// Number of mines adjacent to `(row, col)`, always in 0..=8.
    pub fn adjacent_mines(&self, row: usize, col: usize) -> u8 {
        self.neighbor_positions(row, col)
            .into_iter()
            .filter(|&(neighbor_row, neighbor_col)| {
                self.cells[neighbor_row * self.cols + neighbor_col].is_mine()
            })
            .count() as u8
    }
}

/// Debug rendering: one line per row, one character per cell. Flags win over
/// everything, open mines show `M`, other open cells their adjacent mine
/// count, closed cells `?`.
impl fmt::Display for Minefield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_char('\n')?;
            }
            for col in 0..self.cols {
                let cell = &self.cells[row * self.cols + col];
                let glyph = if cell.is_flagged() {
                    'F'
                } else if cell.is_open() && cell.is_mine() {
                    'M'
                } else if cell.is_open() {
                    (b'0' + self.adjacent_mines(row, col)) as char
                } else {
                    '?'
                };
                f.write_char(glyph)?;
            }
        }
        Ok(())
    }
}
