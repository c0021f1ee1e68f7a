//! Node consistency, arc revision and AC-3 propagation

use super::DomainStore;
use crate::crossword::{Crossword, VarId, WordId};
use std::collections::{BTreeSet, HashSet, VecDeque};
use tracing::{debug, trace};

/// Directed arc `(x, y)`: make `x` consistent with `y`
pub type DirectedArc = (VarId, VarId);

/// Result of AC-3 propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Queue drained with every domain non-empty
    Consistent,
    /// The slot's domain was emptied; the puzzle is unsatisfiable under the
    /// current domains
    Wipeout(VarId),
}

impl Propagation {
    pub fn is_consistent(self) -> bool {
        matches!(self, Propagation::Consistent)
    }
}

/// Enforces unary and binary constraints on a [`DomainStore`]
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyEngine<'a> {
    crossword: &'a Crossword,
}

impl<'a> ConsistencyEngine<'a> {
    pub fn new(crossword: &'a Crossword) -> Self {
        Self { crossword }
    }

    /// Drop every word whose length differs from its slot's length
    pub fn enforce_node_consistency(&self, domains: &mut DomainStore) {
        let vocabulary = self.crossword.vocabulary();

        for var in self.crossword.variable_ids() {
            let length = self.crossword.variable(var).length;
            let filtered: BTreeSet<WordId> = domains
                .get(var)
                .iter()
                .copied()
                .filter(|&word| vocabulary.length(word) == length)
                .collect();
            domains.replace(var, filtered);
        }

        debug!(remaining = domains.total(), "node consistency enforced");
    }

    /// Make `x` arc consistent with `y`.
    ///
    /// Returns `true` if words were removed from `x`'s domain. `y`'s domain is
    /// never touched.
    pub fn revise(&self, domains: &mut DomainStore, x: VarId, y: VarId) -> bool {
        let Some(overlap) = self.crossword.overlap(x, y) else {
            return false;
        };
        let vocabulary = self.crossword.vocabulary();

        let supported: HashSet<char> = domains
            .get(y)
            .iter()
            .filter_map(|&word| vocabulary.letter(word, overlap.second))
            .collect();

        let current = domains.get(x);
        let revised: BTreeSet<WordId> = current
            .iter()
            .copied()
            .filter(|&word| {
                vocabulary
                    .letter(word, overlap.first)
                    .is_some_and(|letter| supported.contains(&letter))
            })
            .collect();

        if revised.len() == current.len() {
            return false;
        }

        trace!(x, y, removed = current.len() - revised.len(), "revised arc");
        domains.replace(x, revised);
        true
    }

    /// Every ordered pair of distinct slots, in slot order
    pub fn all_arcs(&self) -> Vec<DirectedArc> {
        let ids = self.crossword.variable_ids();
        ids.clone()
            .flat_map(|x| ids.clone().filter(move |&y| y != x).map(move |y| (x, y)))
            .collect()
    }

    /// Run AC-3 from `arcs`, or from every arc when `None`.
    ///
    /// Arcs are processed first-in first-out. After `x` shrinks, `(z, x)` is
    /// queued for each neighbor `z` of `x` other than `y` unless already
    /// pending.
    pub fn ac3(&self, domains: &mut DomainStore, arcs: Option<Vec<DirectedArc>>) -> Propagation {
        let initial = arcs.unwrap_or_else(|| self.all_arcs());

        let mut pending: HashSet<DirectedArc> = HashSet::with_capacity(initial.len());
        let mut queue: VecDeque<DirectedArc> = initial
            .into_iter()
            .filter(|&arc| pending.insert(arc))
            .collect();

        let mut revisions = 0usize;
        while let Some((x, y)) = queue.pop_front() {
            pending.remove(&(x, y));

            if !self.revise(domains, x, y) {
                continue;
            }
            revisions += 1;

            if domains.is_empty(x) {
                debug!(variable = x, revisions, "arc consistency wiped out a domain");
                return Propagation::Wipeout(x);
            }

            for &z in self.crossword.neighbors(x) {
                if z != y && pending.insert((z, x)) {
                    queue.push_back((z, x));
                }
            }
        }

        trace!(revisions, remaining = domains.total(), "arc consistency converged");
        Propagation::Consistent
    }
}
