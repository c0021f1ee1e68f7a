//! Crossword problem instance: grid geometry, word slots, overlaps and vocabulary

pub mod grid;
pub mod variable;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use grid::Grid;
pub use variable::{Direction, Variable};
pub use vocabulary::{Vocabulary, WordId};

use crate::error::CrosswordError;
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};

/// Index of a slot in [`Crossword::variables`]
pub type VarId = usize;

/// Shared cell between two crossing slots: letter `first` of the first slot
/// must equal letter `second` of the second slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlap {
    pub first: usize,
    pub second: usize,
}

impl Overlap {
    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

/// Immutable problem instance handed to the solver
#[derive(Debug, Clone)]
pub struct Crossword {
    grid: Grid,
    variables: Vec<Variable>,
    overlaps: HashMap<(VarId, VarId), Overlap>,
    neighbors: Vec<BTreeSet<VarId>>,
    vocabulary: Vocabulary,
}

impl Crossword {
    /// Build a puzzle from a fillable-cell matrix.
    ///
    /// Every maximal horizontal or vertical run of at least two fillable
    /// cells becomes a slot.
    pub fn new<I, S>(structure: Vec<Vec<bool>>, words: I) -> Result<Self, CrosswordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let grid = Grid::from_cells(structure)?;
        let variables = derive_variables(&grid);
        Self::from_parts(grid, variables, Vocabulary::new(words))
    }

    /// Build a puzzle from an explicit slot list, checked against the grid
    pub fn with_variables<I, S>(
        structure: Vec<Vec<bool>>,
        variables: Vec<Variable>,
        words: I,
    ) -> Result<Self, CrosswordError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let grid = Grid::from_cells(structure)?;
        Self::from_parts(grid, variables, Vocabulary::new(words))
    }

    fn from_parts(
        grid: Grid,
        mut variables: Vec<Variable>,
        vocabulary: Vocabulary,
    ) -> Result<Self, CrosswordError> {
        for variable in &variables {
            validate_variable(&grid, variable)?;
        }

        variables.sort();
        if let Some((variable, _)) = variables.iter().tuple_windows().find(|(a, b)| a == b) {
            return Err(CrosswordError::DuplicateVariable { variable: *variable });
        }

        let positions: Vec<HashMap<(usize, usize), usize>> = variables
            .iter()
            .map(|variable| variable.cells().enumerate().map(|(k, cell)| (cell, k)).collect())
            .collect();

        let mut overlaps = HashMap::new();
        let mut neighbors = vec![BTreeSet::new(); variables.len()];

        for (x, y) in (0..variables.len()).tuple_combinations() {
            let shared: Vec<Overlap> = positions[x]
                .iter()
                .filter_map(|(cell, &i)| positions[y].get(cell).map(|&j| Overlap { first: i, second: j }))
                .collect();

            match shared.as_slice() {
                [] => {}
                [overlap] => {
                    overlaps.insert((x, y), *overlap);
                    overlaps.insert((y, x), overlap.swapped());
                    neighbors[x].insert(y);
                    neighbors[y].insert(x);
                }
                _ => {
                    return Err(CrosswordError::AmbiguousOverlap {
                        first: variables[x],
                        second: variables[y],
                        shared: shared.len(),
                    })
                }
            }
        }

        Ok(Self {
            grid,
            variables,
            overlaps,
            neighbors,
            vocabulary,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_ids(&self) -> std::ops::Range<VarId> {
        0..self.variables.len()
    }

    /// Id of a slot, if it belongs to this puzzle
    pub fn id_of(&self, variable: &Variable) -> Option<VarId> {
        self.variables.binary_search(variable).ok()
    }

    /// Overlap of `x` with `y`, indices ordered as (x's letter, y's letter)
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    pub fn neighbors(&self, x: VarId) -> &BTreeSet<VarId> {
        &self.neighbors[x]
    }

    pub fn degree(&self, x: VarId) -> usize {
        self.neighbors[x].len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

fn validate_variable(grid: &Grid, variable: &Variable) -> Result<(), CrosswordError> {
    if variable.length == 0 {
        return Err(CrosswordError::ZeroLength { variable: *variable });
    }

    for (row, col) in variable.cells() {
        if row >= grid.height || col >= grid.width {
            return Err(CrosswordError::OutOfBounds {
                variable: *variable,
                height: grid.height,
                width: grid.width,
            });
        }
        if !grid.is_fillable(row, col) {
            return Err(CrosswordError::BlockedCell {
                variable: *variable,
                row,
                col,
            });
        }
    }

    Ok(())
}

/// Maximal runs of two or more fillable cells in both directions
fn derive_variables(grid: &Grid) -> Vec<Variable> {
    let run_length = |row: usize, col: usize, direction: Direction| {
        (0..)
            .map(|k| Variable::new(row, col, direction, k + 1).cell(k))
            .take_while(|&(r, c)| grid.is_fillable(r, c))
            .count()
    };

    let mut variables = Vec::new();
    for row in 0..grid.height {
        for col in 0..grid.width {
            if !grid.is_fillable(row, col) {
                continue;
            }

            if col == 0 || !grid.is_fillable(row, col - 1) {
                let length = run_length(row, col, Direction::Across);
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
            }

            if row == 0 || !grid.is_fillable(row - 1, col) {
                let length = run_length(row, col, Direction::Down);
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
            }
        }
    }
    variables
}
