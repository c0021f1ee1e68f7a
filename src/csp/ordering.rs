//! Variable and value ordering heuristics for the backtracking search

use super::{Assignment, DomainStore};
use crate::config::{ValueOrdering, VariableOrdering};
use crate::crossword::{Crossword, VarId, WordId};
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Picks the next slot and ranks its candidate words
#[derive(Debug, Clone, Copy)]
pub struct Heuristics<'a> {
    crossword: &'a Crossword,
    variable_ordering: VariableOrdering,
    value_ordering: ValueOrdering,
}

impl<'a> Heuristics<'a> {
    pub fn new(
        crossword: &'a Crossword,
        variable_ordering: VariableOrdering,
        value_ordering: ValueOrdering,
    ) -> Self {
        Self {
            crossword,
            variable_ordering,
            value_ordering,
        }
    }

    /// Next slot to assign, or `None` when every slot has a word.
    ///
    /// With [`VariableOrdering::MrvDegree`] the slot with the fewest remaining
    /// words wins; ties go to the slot with the most neighbors, then to the
    /// lowest slot id (row-major start cell, across before down).
    pub fn select_unassigned_variable(&self, domains: &DomainStore, assignment: &Assignment) -> Option<VarId> {
        let mut unassigned = self
            .crossword
            .variable_ids()
            .filter(|&var| !assignment.contains(var));

        match self.variable_ordering {
            VariableOrdering::Static => unassigned.next(),
            VariableOrdering::MrvDegree => {
                unassigned.min_by_key(|&var| (domains.len(var), Reverse(self.crossword.degree(var)), var))
            }
        }
    }

    /// Candidate words of `var` in the order they should be tried.
    ///
    /// Least-constraining ordering ranks each word by how many words it would
    /// rule out across the unassigned neighbors of `var`; ties keep
    /// alphabetical order. Domains are not modified.
    pub fn order_domain_values(&self, domains: &DomainStore, assignment: &Assignment, var: VarId) -> Vec<WordId> {
        match self.value_ordering {
            ValueOrdering::Alphabetical => domains.get(var).iter().copied().collect(),
            ValueOrdering::LeastConstraining => {
                let constraints = self.neighbor_letter_counts(domains, assignment, var);
                domains
                    .get(var)
                    .iter()
                    .copied()
                    .sorted_by_key(|&word| self.eliminated(&constraints, word))
                    .collect()
            }
        }
    }

    /// Number of neighbor words that disagree with `word` at the overlaps
    pub fn eliminated(&self, constraints: &[NeighborLetters], word: WordId) -> usize {
        let vocabulary = self.crossword.vocabulary();
        constraints
            .iter()
            .map(|neighbor| {
                let agreeing = vocabulary
                    .letter(word, neighbor.index)
                    .and_then(|letter| neighbor.counts.get(&letter).copied())
                    .unwrap_or(0);
                neighbor.total - agreeing
            })
            .sum()
    }

    /// Letter histograms of the unassigned neighbors of `var`, taken at the
    /// cell each neighbor shares with `var`
    pub fn neighbor_letter_counts(
        &self,
        domains: &DomainStore,
        assignment: &Assignment,
        var: VarId,
    ) -> Vec<NeighborLetters> {
        let vocabulary = self.crossword.vocabulary();

        self.crossword
            .neighbors(var)
            .iter()
            .filter(|&&neighbor| !assignment.contains(neighbor))
            .filter_map(|&neighbor| {
                let overlap = self.crossword.overlap(var, neighbor)?;
                let domain = domains.get(neighbor);
                let counts = domain
                    .iter()
                    .filter_map(|&word| vocabulary.letter(word, overlap.second))
                    .counts();
                Some(NeighborLetters {
                    index: overlap.first,
                    total: domain.len(),
                    counts,
                })
            })
            .collect()
    }
}

/// Letters a neighbor can still place on the shared cell
#[derive(Debug, Clone)]
pub struct NeighborLetters {
    /// Position of the shared cell in the slot being ordered
    pub index: usize,
    /// Size of the neighbor's domain
    pub total: usize,
    pub counts: HashMap<char, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::{fixtures, Direction, Variable};
    use crate::csp::ConsistencyEngine;
    use std::collections::BTreeSet;

    fn preprocessed(crossword: &Crossword) -> DomainStore {
        let mut domains = DomainStore::new(crossword);
        ConsistencyEngine::new(crossword).enforce_node_consistency(&mut domains);
        domains
    }

    fn default_heuristics(crossword: &Crossword) -> Heuristics<'_> {
        Heuristics::new(crossword, VariableOrdering::MrvDegree, ValueOrdering::LeastConstraining)
    }

    #[test]
    fn test_fewest_remaining_values_first() {
        let crossword = fixtures::corner_pair(["CAT", "ANT", "NET"]);
        let mut domains = preprocessed(&crossword);
        domains.replace(1, [0].into_iter().collect());

        let heuristics = default_heuristics(&crossword);
        assert_eq!(heuristics.select_unassigned_variable(&domains, &Assignment::new()), Some(1));
    }

    #[test]
    fn test_lowest_id_breaks_remaining_ties() {
        // Every lattice slot crosses three others
        let crossword = fixtures::lattice(fixtures::LATTICE_WORDS);
        let mut domains = preprocessed(&crossword);

        let top = 0;
        let middle_down = crossword.id_of(&Variable::new(0, 2, Direction::Down, 5)).unwrap();
        let small: BTreeSet<WordId> = domains.get(top).iter().copied().take(2).collect();
        domains.replace(top, small.clone());
        domains.replace(middle_down, small);

        let heuristics = default_heuristics(&crossword);
        assert_eq!(heuristics.select_unassigned_variable(&domains, &Assignment::new()), Some(top));

        let mut assignment = Assignment::new();
        assignment.assign(top, 0);
        assert_eq!(heuristics.select_unassigned_variable(&domains, &assignment), Some(middle_down));
    }

    #[test]
    fn test_degree_preferred_over_lower_id() {
        // (0, 2) down and (2, 1) down each cross only the (2, 0) across slot
        let structure = fixtures::structure(&["##_", "##_", "___", "#_#", "#_#"]);
        let crossword = Crossword::new(structure, ["ABC", "DEF"]).unwrap();
        let domains = DomainStore::new(&crossword);

        let across = crossword.id_of(&Variable::new(2, 0, Direction::Across, 3)).unwrap();
        assert_eq!(across, 1);
        assert_eq!(crossword.degree(across), 2);

        let heuristics = default_heuristics(&crossword);
        assert_eq!(heuristics.select_unassigned_variable(&domains, &Assignment::new()), Some(across));
    }

    #[test]
    fn test_static_ordering() {
        let crossword = fixtures::frame(fixtures::FRAME_WORDS);
        let domains = preprocessed(&crossword);
        let heuristics = Heuristics::new(&crossword, VariableOrdering::Static, ValueOrdering::Alphabetical);

        let mut assignment = Assignment::new();
        assert_eq!(heuristics.select_unassigned_variable(&domains, &assignment), Some(0));
        assignment.assign(0, 0);
        assert_eq!(heuristics.select_unassigned_variable(&domains, &assignment), Some(1));
    }

    #[test]
    fn test_complete_assignment_has_no_next_variable() {
        let crossword = fixtures::corner_pair(["CAT", "ANT"]);
        let domains = preprocessed(&crossword);
        let mut assignment = Assignment::new();
        assignment.assign(0, 1);
        assignment.assign(1, 0);

        assert_eq!(default_heuristics(&crossword).select_unassigned_variable(&domains, &assignment), None);
    }

    #[test]
    fn test_least_constraining_value_first() {
        // Across letter 1 meets down letter 0; the down words start with
        // A, A, C, N and T
        let crossword = fixtures::corner_pair(["TEN", "CAT", "ANT", "ARC", "NET"]);
        let domains = preprocessed(&crossword);
        let heuristics = default_heuristics(&crossword);

        let ordered: Vec<&str> = heuristics
            .order_domain_values(&domains, &Assignment::new(), 0)
            .into_iter()
            .map(|word| crossword.vocabulary().word(word))
            .collect();

        // ANT (N): 4 eliminated, ARC (R): 5, CAT (A): 3, NET (E): 5, TEN (E): 5
        assert_eq!(ordered, vec!["CAT", "ANT", "ARC", "NET", "TEN"]);
    }

    #[test]
    fn test_assigned_neighbors_are_ignored() {
        let crossword = fixtures::corner_pair(["TEN", "CAT", "ANT", "ARC", "NET"]);
        let domains = preprocessed(&crossword);
        let heuristics = default_heuristics(&crossword);

        let mut assignment = Assignment::new();
        assignment.assign(1, 0);

        let ordered = heuristics.order_domain_values(&domains, &assignment, 0);
        let alphabetical: Vec<WordId> = domains.get(0).iter().copied().collect();
        assert_eq!(ordered, alphabetical);
    }

    #[test]
    fn test_ordering_does_not_mutate_domains() {
        let crossword = fixtures::frame(fixtures::FRAME_WORDS);
        let domains = preprocessed(&crossword);
        let before = domains.clone();

        let heuristics = default_heuristics(&crossword);
        for var in crossword.variable_ids() {
            let ordered = heuristics.order_domain_values(&domains, &Assignment::new(), var);
            assert_eq!(ordered.len(), domains.len(var));
        }
        assert_eq!(domains, before);
    }
}
