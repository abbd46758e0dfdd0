/// A single square of the minefield: its fixed (row, col) identity plus the
/// mutable mine/open/flag state. Mutation goes through the crate-internal
/// setters, driven by [`crate::logic::Game`].
#[derive(Debug)]
pub struct Cell {
    row: usize,
    col: usize,
    is_mine: bool,
    is_open: bool,
    is_flagged: bool,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            is_open: false,
            is_flagged: false,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Idempotent: a cell never stops being a mine.
    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    /// Idempotent: a cell never closes again.
    pub(crate) fn set_open(&mut self) {
        self.is_open = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.is_flagged = !self.is_flagged;
    }

    /// Moore-neighborhood adjacency: both coordinate deltas at most one and
    /// not the same square. Symmetric and irreflexive.
    pub fn is_neighbor_of(&self, other: &Cell) -> bool {
        (self.row != other.row || self.col != other.col)
            && self.row.abs_diff(other.row) <= 1
            && self.col.abs_diff(other.col) <= 1
    }
}
