//! Independent validation of slot assignments

use crate::crossword::{Crossword, VarId, Variable, WordId};
use crate::csp::Assignment;
use std::collections::HashMap;
use std::fmt;

/// Checks an assignment against the puzzle without going through the search
pub struct SolutionValidator<'a> {
    crossword: &'a Crossword,
}

/// Result of solution validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub violations: Vec<Violation>,
}

/// A single constraint the assignment breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Unassigned {
        variable: Variable,
    },
    UnknownSlot {
        var: VarId,
        word: WordId,
    },
    UnknownWord {
        variable: Variable,
        word: WordId,
    },
    LengthMismatch {
        variable: Variable,
        word: String,
    },
    ReusedWord {
        word: String,
        first: Variable,
        second: Variable,
    },
    LetterConflict {
        first: Variable,
        second: Variable,
        row: usize,
        col: usize,
        first_letter: char,
        second_letter: char,
    },
}

impl<'a> SolutionValidator<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        Self { crossword }
    }

    /// Validate completeness, lengths, word uniqueness and crossing letters
    pub fn validate(&self, assignment: &Assignment) -> ValidationResult {
        let vocabulary = self.crossword.vocabulary();
        let mut violations = Vec::new();

        for var in self.crossword.variable_ids() {
            if !assignment.contains(var) {
                violations.push(Violation::Unassigned {
                    variable: *self.crossword.variable(var),
                });
            }
        }

        // Only known slots holding known words can be checked further, and
        // only words of the right length are compared at crossings
        let mut known = Vec::with_capacity(assignment.len());
        let mut fitting = Vec::with_capacity(assignment.len());
        for (var, word) in assignment.iter() {
            if var >= self.crossword.variable_count() {
                violations.push(Violation::UnknownSlot { var, word });
                continue;
            }
            let variable = *self.crossword.variable(var);
            if word >= vocabulary.len() {
                violations.push(Violation::UnknownWord { variable, word });
                continue;
            }
            if vocabulary.length(word) == variable.length {
                fitting.push((var, word));
            } else {
                violations.push(Violation::LengthMismatch {
                    variable,
                    word: vocabulary.word(word).to_string(),
                });
            }
            known.push((var, word));
        }

        let mut first_use: HashMap<WordId, Variable> = HashMap::new();
        for &(var, word) in &known {
            let variable = *self.crossword.variable(var);
            if let Some(&first) = first_use.get(&word) {
                violations.push(Violation::ReusedWord {
                    word: vocabulary.word(word).to_string(),
                    first,
                    second: variable,
                });
            } else {
                first_use.insert(word, variable);
            }
        }

        for (index, &(x, x_word)) in fitting.iter().enumerate() {
            for &(y, y_word) in &fitting[index + 1..] {
                let Some(overlap) = self.crossword.overlap(x, y) else {
                    continue;
                };
                let first_letter = vocabulary.letter(x_word, overlap.first);
                let second_letter = vocabulary.letter(y_word, overlap.second);
                // Both words fit their slots, so both letters exist
                if let (Some(first_letter), Some(second_letter)) = (first_letter, second_letter) {
                    if first_letter != second_letter {
                        let first = *self.crossword.variable(x);
                        let (row, col) = first.cell(overlap.first);
                        violations.push(Violation::LetterConflict {
                            first,
                            second: *self.crossword.variable(y),
                            row,
                            col,
                            first_letter,
                            second_letter,
                        });
                    }
                }
            }
        }

        let is_valid = violations.is_empty();
        let error_message = if is_valid {
            None
        } else {
            Some(Self::generate_error_message(&violations))
        };

        ValidationResult {
            is_valid,
            error_message,
            violations,
        }
    }

    /// Only the predicates the search relies on: complete and consistent
    pub fn quick_validate(&self, assignment: &Assignment) -> bool {
        assignment.is_complete(self.crossword) && assignment.is_consistent(self.crossword)
    }

    fn generate_error_message(violations: &[Violation]) -> String {
        let mut message = format!("Found {} violations. ", violations.len());

        for (i, violation) in violations.iter().take(3).enumerate() {
            if i == 0 {
                message.push_str("Examples: ");
            }
            message.push_str(&format!("{}; ", violation));
        }

        if violations.len() > 3 {
            message.push_str(&format!("... and {} more", violations.len() - 3));
        }

        message
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unassigned { variable } => write!(f, "slot {} has no word", variable),
            Violation::UnknownSlot { var, word } => {
                write!(f, "unknown slot id {} holds word id {}", var, word)
            }
            Violation::UnknownWord { variable, word } => {
                write!(f, "slot {} holds unknown word id {}", variable, word)
            }
            Violation::LengthMismatch { variable, word } => {
                write!(f, "word {} does not fit slot {}", word, variable)
            }
            Violation::ReusedWord { word, first, second } => {
                write!(f, "word {} is used by both {} and {}", word, first, second)
            }
            Violation::LetterConflict {
                first,
                second,
                row,
                col,
                first_letter,
                second_letter,
            } => write!(
                f,
                "slots {} and {} disagree at ({}, {}): {} vs {}",
                first, second, row, col, first_letter, second_letter
            ),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result: {}", if self.is_valid { "VALID" } else { "INVALID" })?;

        if let Some(ref error) = self.error_message {
            writeln!(f, "Error: {}", error)?;
        }

        writeln!(f, "Violations: {}", self.violations.len())?;
        Ok(())
    }
}
