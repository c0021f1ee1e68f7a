//! Depth-first backtracking search over slot assignments

use super::{Assignment, ConsistencyEngine, DomainSnapshot, DomainStore, Heuristics};
use crate::crossword::{Crossword, VarId, WordId};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Why a search stopped before finishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interrupt {
    Cancelled,
    TimedOut,
}

/// Cooperative stop signal polled at every search step
#[derive(Debug, Clone)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Cancellation {
    pub fn new(flag: Arc<AtomicBool>, timeout: Option<Duration>) -> Self {
        Self {
            flag,
            deadline: timeout.map(|limit| Instant::now() + limit),
        }
    }

    /// A signal that never fires
    pub fn never() -> Self {
        Self::new(Arc::new(AtomicBool::new(false)), None)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn check(&self) -> Option<Interrupt> {
        if self.flag.load(Ordering::Relaxed) {
            return Some(Interrupt::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Interrupt::TimedOut),
            _ => None,
        }
    }
}

/// How a search ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Complete, consistent assignment
    Solved(Assignment),
    /// Every branch failed
    Exhausted,
    Interrupted(Interrupt),
}

/// Counters collected while searching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Slots selected for assignment
    pub nodes: usize,
    /// Candidate words tentatively assigned
    pub assignments: usize,
    /// Candidates rejected by the consistency check
    pub rejections: usize,
    /// Candidates rejected because inference emptied a domain
    pub wipeouts: usize,
    /// Slots whose candidates were exhausted
    pub backtracks: usize,
}

impl SearchStatistics {
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes += other.nodes;
        self.assignments += other.assignments;
        self.rejections += other.rejections;
        self.wipeouts += other.wipeouts;
        self.backtracks += other.backtracks;
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes: {}", self.nodes)?;
        writeln!(f, "  Assignments tried: {}", self.assignments)?;
        writeln!(f, "  Consistency rejections: {}", self.rejections)?;
        writeln!(f, "  Inference wipeouts: {}", self.wipeouts)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        Ok(())
    }
}

/// One level of the explicit search stack
struct Frame {
    var: VarId,
    candidates: std::vec::IntoIter<WordId>,
    /// Domains before inference for the current candidate
    checkpoint: Option<DomainSnapshot>,
}

/// Backtracking search with an explicit frame stack.
///
/// Visits the same nodes in the same order as the recursive
/// assign/recurse/unassign formulation.
pub struct BacktrackingSearch<'a> {
    crossword: &'a Crossword,
    heuristics: Heuristics<'a>,
    engine: ConsistencyEngine<'a>,
    inference: bool,
    cancellation: &'a Cancellation,
    statistics: SearchStatistics,
}

impl<'a> BacktrackingSearch<'a> {
    pub fn new(
        crossword: &'a Crossword,
        heuristics: Heuristics<'a>,
        inference: bool,
        cancellation: &'a Cancellation,
    ) -> Self {
        Self {
            crossword,
            heuristics,
            engine: ConsistencyEngine::new(crossword),
            inference,
            cancellation,
            statistics: SearchStatistics::default(),
        }
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Extend `assignment` to a complete one, or report why that failed
    pub fn run(&mut self, mut domains: DomainStore, mut assignment: Assignment) -> SearchOutcome {
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            if let Some(interrupt) = self.cancellation.check() {
                return SearchOutcome::Interrupted(interrupt);
            }

            if assignment.is_complete(self.crossword) {
                debug!(nodes = self.statistics.nodes, "search found a complete assignment");
                return SearchOutcome::Solved(assignment);
            }

            let Some(var) = self.heuristics.select_unassigned_variable(&domains, &assignment) else {
                return SearchOutcome::Exhausted;
            };
            self.statistics.nodes += 1;

            let candidates = self.heuristics.order_domain_values(&domains, &assignment, var);
            trace!(var, depth = stack.len(), candidates = candidates.len(), "expanding slot");
            stack.push(Frame {
                var,
                candidates: candidates.into_iter(),
                checkpoint: None,
            });

            if let Some(outcome) = self.advance(&mut stack, &mut domains, &mut assignment) {
                return outcome;
            }
        }
    }

    /// Move the deepest frame to its next acceptable candidate, popping
    /// exhausted frames. Returns an outcome only when the search must stop.
    fn advance(
        &mut self,
        stack: &mut Vec<Frame>,
        domains: &mut DomainStore,
        assignment: &mut Assignment,
    ) -> Option<SearchOutcome> {
        while let Some(frame) = stack.last_mut() {
            if let Some(interrupt) = self.cancellation.check() {
                return Some(SearchOutcome::Interrupted(interrupt));
            }

            let var = frame.var;
            if assignment.unassign(var).is_some() {
                if let Some(checkpoint) = frame.checkpoint.take() {
                    domains.restore(checkpoint);
                }
            }

            let Some(word) = frame.candidates.next() else {
                trace!(var, "candidates exhausted, backtracking");
                self.statistics.backtracks += 1;
                stack.pop();
                continue;
            };

            self.statistics.assignments += 1;
            assignment.assign(var, word);

            if !assignment.is_consistent_with(self.crossword, var) {
                self.statistics.rejections += 1;
                assignment.unassign(var);
                continue;
            }

            if self.inference {
                match self.infer(domains, assignment, var, word) {
                    Some(checkpoint) => frame.checkpoint = Some(checkpoint),
                    None => {
                        self.statistics.wipeouts += 1;
                        assignment.unassign(var);
                        continue;
                    }
                }
            }

            return None;
        }

        Some(SearchOutcome::Exhausted)
    }

    /// Narrow `var` to `word` and propagate to its unassigned neighbors.
    ///
    /// Returns the pre-inference snapshot on success; on a wipeout the
    /// domains are already restored.
    fn infer(
        &self,
        domains: &mut DomainStore,
        assignment: &Assignment,
        var: VarId,
        word: WordId,
    ) -> Option<DomainSnapshot> {
        let checkpoint = domains.snapshot();
        domains.replace(var, BTreeSet::from([word]));

        let arcs = self
            .crossword
            .neighbors(var)
            .iter()
            .filter(|&&neighbor| !assignment.contains(neighbor))
            .map(|&neighbor| (neighbor, var))
            .collect();

        if self.engine.ac3(domains, Some(arcs)).is_consistent() {
            Some(checkpoint)
        } else {
            domains.restore(checkpoint);
            None
        }
    }

    /// Search the subtree below `var = word`, starting from `domains`
    fn run_branch(&mut self, mut domains: DomainStore, var: VarId, word: WordId) -> SearchOutcome {
        let mut assignment = Assignment::new();
        self.statistics.assignments += 1;
        assignment.assign(var, word);

        if !assignment.is_consistent_with(self.crossword, var) {
            self.statistics.rejections += 1;
            return SearchOutcome::Exhausted;
        }

        if self.inference && self.infer(&mut domains, &assignment, var, word).is_none() {
            self.statistics.wipeouts += 1;
            return SearchOutcome::Exhausted;
        }

        self.run(domains, assignment)
    }
}

/// Fork the search on the candidates of the first selected slot.
///
/// Each branch gets its own copy of the domains. The first branch in
/// candidate order that either succeeds or is interrupted decides the
/// outcome, so without a deadline the result matches the sequential search.
/// Under a deadline, branches race: a later branch may be interrupted while
/// an earlier one is still running, and the earlier branch still wins if it
/// finishes first.
pub fn run_parallel(
    crossword: &Crossword,
    heuristics: Heuristics<'_>,
    inference: bool,
    cancellation: &Cancellation,
    domains: DomainStore,
) -> (SearchOutcome, SearchStatistics) {
    let root = Assignment::new();
    let Some(var) = heuristics.select_unassigned_variable(&domains, &root) else {
        // No slots at all
        return (SearchOutcome::Solved(root), SearchStatistics::default());
    };
    let candidates = heuristics.order_domain_values(&domains, &root, var);
    debug!(var, branches = candidates.len(), "forking search");

    let totals = Mutex::new(SearchStatistics {
        nodes: 1,
        ..SearchStatistics::default()
    });

    let decided = candidates.par_iter().find_map_first(|&word| {
        let mut search = BacktrackingSearch::new(crossword, heuristics, inference, cancellation);
        let outcome = search.run_branch(domains.clone(), var, word);
        if let Ok(mut totals) = totals.lock() {
            totals.merge(search.statistics());
        }
        match outcome {
            SearchOutcome::Exhausted => None,
            decided => Some(decided),
        }
    });

    let mut statistics = totals.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
    let outcome = match decided {
        Some(outcome) => outcome,
        None => match cancellation.check() {
            Some(interrupt) => SearchOutcome::Interrupted(interrupt),
            None => {
                statistics.backtracks += 1;
                SearchOutcome::Exhausted
            }
        },
    };

    (outcome, statistics)
}
