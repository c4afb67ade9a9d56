use serde::{Serialize, Deserialize};

use crate::game::types::{Position, Symbol};

/// Fixed-size board of symbols, immutable once a session owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Build a grid from a fixed layout. Returns `None` if the rows are ragged.
    pub fn from_rows(cells: Vec<Vec<Symbol>>) -> Option<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, |row| row.len());
        if cells.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { rows, cols, cells })
    }

    /// Caller guarantees `cells` is `rows x cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Vec<Symbol>>) -> Self {
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, pos: Position) -> Option<Symbol> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    pub fn cells(&self) -> &[Vec<Symbol>] {
        &self.cells
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells.iter().flatten().filter(|&&s| s == symbol).count()
    }

    /// In-bounds cells of the 8-neighborhood of `pos`, in row-major order.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        neighbors_within(self.rows, self.cols, pos)
    }
}

pub(crate) fn neighbors_within(rows: usize, cols: usize, pos: Position) -> Vec<Position> {
    let mut out = Vec::with_capacity(8);
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (Some(row), Some(col)) = (
                pos.row.checked_add_signed(dr),
                pos.col.checked_add_signed(dc),
            ) else {
                continue;
            };
            if row < rows && col < cols {
                out.push(Position::new(row, col));
            }
        }
    }
    out
}
