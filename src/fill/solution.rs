//! Solved-grid view of an assignment

use crate::crossword::{Crossword, Grid, Variable};
use crate::csp::Assignment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Letters placed on the puzzle grid by an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub grid: Grid,
    /// Filled slots in slot order
    pub entries: Vec<Entry>,
    /// Row-major letters; `None` for blocked or unfilled cells
    pub letters: Vec<Option<char>>,
    #[serde(skip)]
    pub solve_time: Duration,
}

/// One slot and the word written into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub variable: Variable,
    pub word: String,
}

/// Short description of a solution
#[derive(Debug, Clone, Serialize)]
pub struct SolutionSummary {
    pub entries: usize,
    pub filled_cells: usize,
    pub fillable_cells: usize,
    pub solve_time_ms: u64,
}

impl Solution {
    /// Write every assigned word into its slot's cells
    pub fn new(crossword: &Crossword, assignment: &Assignment) -> Self {
        let grid = crossword.grid().clone();
        let mut letters = vec![None; grid.width * grid.height];

        let entries: Vec<Entry> = assignment
            .words(crossword)
            .map(|(variable, word)| Entry {
                variable: *variable,
                word: word.to_string(),
            })
            .collect();

        for entry in &entries {
            for ((row, col), letter) in entry.variable.cells().zip(entry.word.chars()) {
                letters[grid.index(row, col)] = Some(letter);
            }
        }

        Self {
            grid,
            entries,
            letters,
            solve_time: Duration::ZERO,
        }
    }

    pub fn with_solve_time(mut self, solve_time: Duration) -> Self {
        self.solve_time = solve_time;
        self
    }

    /// Letter at a cell, if the cell is fillable and filled
    pub fn letter(&self, row: usize, col: usize) -> Option<char> {
        if row >= self.grid.height || col >= self.grid.width {
            return None;
        }
        self.letters[self.grid.index(row, col)]
    }

    /// Rows of letters with `None` for blocked or empty cells
    pub fn letter_grid(&self) -> Vec<Vec<Option<char>>> {
        self.letters
            .chunks(self.grid.width)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Word written into `variable`, if any
    pub fn word_for(&self, variable: &Variable) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.variable == *variable)
            .map(|entry| entry.word.as_str())
    }

    pub fn is_equivalent_to(&self, other: &Solution) -> bool {
        self.grid == other.grid && self.letters == other.letters
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            entries: self.entries.len(),
            filled_cells: self.letters.iter().flatten().count(),
            fillable_cells: self.grid.fillable_count(),
            solve_time_ms: self.solve_time.as_millis() as u64,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.grid.height {
            for col in 0..self.grid.width {
                let cell = if !self.grid.is_fillable(row, col) {
                    '█'
                } else {
                    self.letter(row, col).unwrap_or(' ')
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution Summary:")?;
        writeln!(f, "  Entries: {}", self.entries)?;
        writeln!(f, "  Filled cells: {}/{}", self.filled_cells, self.fillable_cells)?;
        writeln!(f, "  Solve time: {}ms", self.solve_time_ms)?;
        Ok(())
    }
}
