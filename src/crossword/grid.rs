//! Fillable-cell structure of a crossword grid

use crate::error::CrosswordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which cells of the puzzle can hold a letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a grid from a row-major matrix of fillable flags
    pub fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self, CrosswordError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Err(CrosswordError::EmptyStructure);
        }

        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(CrosswordError::RaggedRow {
                    row,
                    length: line.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Convert 2D coordinates to 1D index
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Whether a cell can hold a letter; out-of-bounds cells are blocked
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)]
    }

    pub fn fillable_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let symbol = if self.is_fillable(row, col) { '_' } else { '█' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
