//! Candidate-word sets per slot

use crate::crossword::{Crossword, VarId, WordId};
use std::collections::BTreeSet;

/// Current domain of every slot, indexed by [`VarId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<BTreeSet<WordId>>,
}

/// Saved copy of all domains, restored when a search step is undone
#[derive(Debug, Clone)]
pub struct DomainSnapshot(Vec<BTreeSet<WordId>>);

impl DomainStore {
    /// Every slot starts with its own copy of the whole vocabulary
    pub fn new(crossword: &Crossword) -> Self {
        let full: BTreeSet<WordId> = crossword.vocabulary().ids().collect();
        Self {
            domains: vec![full; crossword.variable_count()],
        }
    }

    pub fn get(&self, var: VarId) -> &BTreeSet<WordId> {
        &self.domains[var]
    }

    pub fn replace(&mut self, var: VarId, domain: BTreeSet<WordId>) {
        self.domains[var] = domain;
    }

    pub fn len(&self, var: VarId) -> usize {
        self.domains[var].len()
    }

    pub fn is_empty(&self, var: VarId) -> bool {
        self.domains[var].is_empty()
    }

    /// First slot whose domain has been emptied
    pub fn first_empty(&self) -> Option<VarId> {
        self.domains.iter().position(BTreeSet::is_empty)
    }

    /// Sum of all domain sizes
    pub fn total(&self) -> usize {
        self.domains.iter().map(BTreeSet::len).sum()
    }

    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot(self.domains.clone())
    }

    pub fn restore(&mut self, snapshot: DomainSnapshot) {
        self.domains = snapshot.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::fixtures;

    #[test]
    fn test_domains_start_with_full_vocabulary() {
        let crossword = fixtures::corner_pair(["CAT", "DOG", "HORSE"]);
        let domains = DomainStore::new(&crossword);

        for var in crossword.variable_ids() {
            assert_eq!(domains.len(var), 3);
        }
        assert_eq!(domains.total(), 6);
        assert_eq!(domains.first_empty(), None);
    }

    #[test]
    fn test_domains_are_independent() {
        let crossword = fixtures::corner_pair(["CAT", "DOG"]);
        let mut domains = DomainStore::new(&crossword);

        domains.replace(0, BTreeSet::from([1]));
        assert_eq!(domains.get(0), &BTreeSet::from([1]));
        assert_eq!(domains.len(1), 2);

        domains.replace(1, BTreeSet::new());
        assert!(domains.is_empty(1));
        assert_eq!(domains.first_empty(), Some(1));
    }

    #[test]
    fn test_snapshot_restore() {
        let crossword = fixtures::corner_pair(["CAT", "DOG"]);
        let mut domains = DomainStore::new(&crossword);
        let before = domains.clone();

        let snapshot = domains.snapshot();
        domains.replace(0, BTreeSet::new());
        domains.restore(snapshot);

        assert_eq!(domains, before);
    }
}
