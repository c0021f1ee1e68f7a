//! Small puzzles shared by unit tests

use super::{Crossword, Direction, Variable};

/// `_` fillable, `#` blocked
pub(crate) fn structure(rows: &[&str]) -> Vec<Vec<bool>> {
    rows.iter()
        .map(|row| row.chars().map(|ch| ch == '_').collect())
        .collect()
}

/// A 3-letter across slot whose middle letter starts a 3-letter down slot
pub(crate) fn corner_pair<const N: usize>(words: [&str; N]) -> Crossword {
    Crossword::new(structure(&["___", "#_#", "#_#"]), words).unwrap()
}

/// Two across and two down slots of length 4 joined at the corners
pub(crate) fn frame<const N: usize>(words: [&str; N]) -> Crossword {
    Crossword::new(structure(&["____", "_##_", "_##_", "____"]), words).unwrap()
}

pub(crate) const FRAME_WORDS: [&str; 7] = ["TEAM", "TRAP", "MAST", "PART", "NOPE", "ZZZZ", "CAT"];

/// A 4-letter across slot crossing a 5-letter down slot at (1, 2)
pub(crate) fn long_cross<const N: usize>(words: [&str; N]) -> Crossword {
    let variables = vec![
        Variable::new(2, 0, Direction::Across, 4),
        Variable::new(0, 1, Direction::Down, 5),
    ];
    Crossword::with_variables(vec![vec![true; 4]; 5], variables, words).unwrap()
}

/// A denser 5x5 puzzle with six interlocking slots
pub(crate) fn lattice<const N: usize>(words: [&str; N]) -> Crossword {
    Crossword::new(structure(&["_____", "_#_#_", "_____", "_#_#_", "_____"]), words).unwrap()
}

/// Valid fill for [`lattice`] (intersections spell A..I) plus two distractors
pub(crate) const LATTICE_WORDS: [&str; 8] = [
    "AQBQC", "DQEQF", "GQHQI", "AZDZG", "BZEZH", "CZFZI", "QQQQQ", "ABCDE",
];
