//! Error types for problem construction and solving

use crate::crossword::Variable;
use thiserror::Error;

/// A problem instance that cannot be solved as given
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrosswordError {
    #[error("grid structure is empty")]
    EmptyStructure,

    #[error("row {row} has length {length}, expected {expected}")]
    RaggedRow {
        row: usize,
        length: usize,
        expected: usize,
    },

    #[error("slot {variable} has zero length")]
    ZeroLength { variable: Variable },

    #[error("slot {variable} extends outside the {height}x{width} grid")]
    OutOfBounds {
        variable: Variable,
        height: usize,
        width: usize,
    },

    #[error("slot {variable} covers blocked cell ({row}, {col})")]
    BlockedCell {
        variable: Variable,
        row: usize,
        col: usize,
    },

    #[error("slot {variable} is listed more than once")]
    DuplicateVariable { variable: Variable },

    #[error("slots {first} and {second} share {shared} cells")]
    AmbiguousOverlap {
        first: Variable,
        second: Variable,
        shared: usize,
    },
}

/// Internal invariant failures surfaced by the solver
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("search produced an assignment that fails validation: {0}")]
    InvalidAssignment(String),
}
