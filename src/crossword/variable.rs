//! Word slots of a crossword

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Across,
    Down,
}

/// One word slot: start cell, direction and required length.
///
/// The derived ordering is row-major by start cell with `Across` before
/// `Down`, which is also the order slots are indexed in a [`Crossword`].
///
/// [`Crossword`]: super::Crossword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// Cell holding the `k`-th letter of the slot
    pub fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |k| self.cell(k))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} {}", self.row, self.col, self.direction, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells() {
        let across = Variable::new(1, 2, Direction::Across, 3);
        assert_eq!(across.cells().collect::<Vec<_>>(), vec![(1, 2), (1, 3), (1, 4)]);

        let down = Variable::new(0, 4, Direction::Down, 2);
        assert_eq!(down.cells().collect::<Vec<_>>(), vec![(0, 4), (1, 4)]);
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut slots = vec![
            Variable::new(1, 0, Direction::Across, 3),
            Variable::new(0, 2, Direction::Down, 3),
            Variable::new(0, 0, Direction::Down, 3),
            Variable::new(0, 0, Direction::Across, 3),
        ];
        slots.sort();

        assert_eq!(slots[0], Variable::new(0, 0, Direction::Across, 3));
        assert_eq!(slots[1], Variable::new(0, 0, Direction::Down, 3));
        assert_eq!(slots[2], Variable::new(0, 2, Direction::Down, 3));
        assert_eq!(slots[3], Variable::new(1, 0, Direction::Across, 3));
    }

    #[test]
    fn test_equality_uses_all_attributes() {
        let slot = Variable::new(0, 0, Direction::Across, 3);
        assert_ne!(slot, Variable::new(0, 0, Direction::Across, 4));
        assert_ne!(slot, Variable::new(0, 0, Direction::Down, 3));
        assert_eq!(slot.to_string(), "(0, 0) across 3");
    }
}
