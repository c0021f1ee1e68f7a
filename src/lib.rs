//! Crossword CSP Solver
//!
//! Fills a crossword grid from a vocabulary by treating every slot as a
//! variable whose domain is a set of words, pruning with node and arc
//! consistency and finishing with backtracking search.

pub mod config;
pub mod crossword;
pub mod csp;
pub mod error;
pub mod fill;

pub use config::Settings;
pub use crossword::{Crossword, Direction, Variable};
pub use csp::Assignment;
pub use error::{CrosswordError, SolveError};
pub use fill::{CrosswordSolver, Solution, SolveReport, SolveStatus};

/// Fill `crossword` with default settings.
///
/// `Ok(None)` means no assignment exists, whether arc consistency emptied a
/// domain or the search ran out of candidates.
pub fn solve(crossword: &Crossword) -> Result<Option<Assignment>, SolveError> {
    let report = CrosswordSolver::default().solve(crossword)?;
    Ok(report.assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::fixtures;

    #[test]
    fn test_corner_pair_is_filled() {
        let crossword = fixtures::corner_pair(["CAT", "DOG", "TEN", "NET", "ANT"]);
        let assignment = solve(&crossword).unwrap().unwrap();

        assert!(assignment.is_complete(&crossword));
        assert!(assignment.is_consistent(&crossword));

        let words: Vec<&str> = assignment.words(&crossword).map(|(_, word)| word).collect();
        assert!(words == ["CAT", "ANT"] || words == ["ANT", "NET"]);
    }

    #[test]
    fn test_no_crossing_letter_has_no_solution() {
        let crossword = fixtures::corner_pair(["ABC", "XYZ"]);
        assert_eq!(solve(&crossword).unwrap(), None);
    }

    #[test]
    fn test_solution_never_reuses_a_word() {
        let crossword = fixtures::frame(fixtures::FRAME_WORDS);
        let assignment = solve(&crossword).unwrap().unwrap();

        let mut words: Vec<_> = assignment.iter().map(|(_, word)| word).collect();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), crossword.variable_count());
    }

    #[test]
    fn test_solve_is_deterministic() {
        let crossword = fixtures::lattice(fixtures::LATTICE_WORDS);
        let first = solve(&crossword).unwrap();
        assert!(first.is_some());
        for _ in 0..3 {
            assert_eq!(solve(&crossword).unwrap(), first);
        }
    }

    #[test]
    fn test_grid_without_slots_is_trivially_solved() {
        let structure = fixtures::structure(&["_#", "#_"]);
        let crossword = Crossword::new(structure, ["A"]).unwrap();

        assert_eq!(crossword.variable_count(), 0);
        assert_eq!(solve(&crossword).unwrap(), Some(Assignment::new()));
    }

    #[test]
    fn test_missing_word_length_has_no_solution() {
        // No five-letter word for the down slot
        let crossword = fixtures::long_cross(["CODE", "NODE", "CAT"]);
        assert_eq!(solve(&crossword).unwrap(), None);
    }

    #[test]
    fn test_empty_vocabulary_has_no_solution() {
        let crossword = fixtures::frame::<0>([]);
        assert_eq!(solve(&crossword).unwrap(), None);
    }

    #[test]
    fn test_solution_rendering() {
        let crossword = fixtures::frame(fixtures::FRAME_WORDS);
        let assignment = solve(&crossword).unwrap().unwrap();
        let rendered = Solution::new(&crossword, &assignment).to_string();

        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains("██"));
        assert!(rows.iter().all(|row| row.chars().count() == 4));
    }
}
