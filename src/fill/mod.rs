//! Filling a crossword and presenting the result

pub mod solution;
pub mod solver;
pub mod validator;

pub use solution::{Entry, Solution, SolutionSummary};
pub use solver::{CrosswordSolver, SolveReport, SolveStatistics, SolveStatus};
pub use validator::{SolutionValidator, ValidationResult, Violation};
