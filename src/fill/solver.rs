//! End-to-end fill: preprocessing, search and validation

use super::{Solution, SolutionValidator};
use crate::config::Settings;
use crate::crossword::Crossword;
use crate::csp::search::run_parallel;
use crate::csp::{
    Assignment, BacktrackingSearch, Cancellation, ConsistencyEngine, DomainStore, Heuristics, Interrupt,
    Propagation, SearchOutcome, SearchStatistics,
};
use crate::error::SolveError;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Satisfiable,
    /// Arc consistency emptied a domain or the search ran out of candidates
    Unsatisfiable,
    Cancelled,
    TimedOut,
}

impl From<Interrupt> for SolveStatus {
    fn from(interrupt: Interrupt) -> Self {
        match interrupt {
            Interrupt::Cancelled => SolveStatus::Cancelled,
            Interrupt::TimedOut => SolveStatus::TimedOut,
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolveStatus::Satisfiable => "satisfiable",
            SolveStatus::Unsatisfiable => "unsatisfiable",
            SolveStatus::Cancelled => "cancelled",
            SolveStatus::TimedOut => "timed out",
        };
        f.write_str(label)
    }
}

/// Statistics about one solve
#[derive(Debug, Clone, Default, Serialize)]
pub struct SolveStatistics {
    pub variables: usize,
    pub words: usize,
    /// Sum of domain sizes before any filtering
    pub initial_domain_total: usize,
    pub node_consistent_domain_total: usize,
    /// `None` when arc consistency is disabled or wiped out a domain
    pub arc_consistent_domain_total: Option<usize>,
    pub search: SearchStatistics,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl fmt::Display for SolveStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solve Statistics:")?;
        writeln!(f, "  Slots: {}", self.variables)?;
        writeln!(f, "  Words: {}", self.words)?;
        writeln!(f, "  Candidates initially: {}", self.initial_domain_total)?;
        writeln!(f, "  After node consistency: {}", self.node_consistent_domain_total)?;
        if let Some(total) = self.arc_consistent_domain_total {
            writeln!(f, "  After arc consistency: {}", total)?;
        }
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        write!(f, "{}", self.search)
    }
}

/// Outcome of [`CrosswordSolver::solve`]
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub status: SolveStatus,
    /// Present only when the status is [`SolveStatus::Satisfiable`]
    pub assignment: Option<Assignment>,
    pub statistics: SolveStatistics,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Satisfiable
    }

    pub fn solution(&self, crossword: &Crossword) -> Option<Solution> {
        self.assignment
            .as_ref()
            .map(|assignment| Solution::new(crossword, assignment).with_solve_time(self.statistics.solve_time))
    }
}

/// Fills crosswords according to [`Settings`]
pub struct CrosswordSolver {
    settings: Settings,
    cancelled: Arc<AtomicBool>,
}

impl Default for CrosswordSolver {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl CrosswordSolver {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Flag that stops a running solve once set. It stays set, so later
    /// solves with this solver are cancelled too.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Node consistency, optional AC-3, then backtracking search.
    ///
    /// Returns an error only if the search produced an assignment that fails
    /// independent validation.
    pub fn solve(&self, crossword: &Crossword) -> Result<SolveReport, SolveError> {
        let start_time = Instant::now();
        let cancellation = Cancellation::new(Arc::clone(&self.cancelled), self.settings.search.timeout());

        info!(
            slots = crossword.variable_count(),
            words = crossword.vocabulary().len(),
            "solving crossword"
        );

        let mut statistics = SolveStatistics {
            variables: crossword.variable_count(),
            words: crossword.vocabulary().len(),
            ..SolveStatistics::default()
        };

        if let Some(interrupt) = cancellation.check() {
            return Ok(self.finish(interrupt.into(), None, statistics, start_time));
        }

        let engine = ConsistencyEngine::new(crossword);
        let mut domains = DomainStore::new(crossword);
        statistics.initial_domain_total = domains.total();

        engine.enforce_node_consistency(&mut domains);
        statistics.node_consistent_domain_total = domains.total();

        if let Some(var) = domains.first_empty() {
            debug!(slot = %crossword.variable(var), "no word has the slot's length");
            return Ok(self.finish(SolveStatus::Unsatisfiable, None, statistics, start_time));
        }

        if self.settings.propagation.arc_consistency {
            if let Propagation::Wipeout(var) = engine.ac3(&mut domains, None) {
                debug!(slot = %crossword.variable(var), "no word fits after arc consistency");
                return Ok(self.finish(SolveStatus::Unsatisfiable, None, statistics, start_time));
            }
            statistics.arc_consistent_domain_total = Some(domains.total());
            debug!(remaining = domains.total(), "arc consistency enforced");
        }

        let (outcome, search_statistics) = self.search(crossword, &cancellation, domains);
        statistics.search = search_statistics;

        match outcome {
            SearchOutcome::Solved(assignment) => {
                let validation = SolutionValidator::new(crossword).validate(&assignment);
                if !validation.is_valid {
                    return Err(SolveError::InvalidAssignment(
                        validation.error_message.unwrap_or_default(),
                    ));
                }
                Ok(self.finish(SolveStatus::Satisfiable, Some(assignment), statistics, start_time))
            }
            SearchOutcome::Exhausted => Ok(self.finish(SolveStatus::Unsatisfiable, None, statistics, start_time)),
            SearchOutcome::Interrupted(interrupt) => Ok(self.finish(interrupt.into(), None, statistics, start_time)),
        }
    }

    fn search(
        &self,
        crossword: &Crossword,
        cancellation: &Cancellation,
        domains: DomainStore,
    ) -> (SearchOutcome, SearchStatistics) {
        let search = &self.settings.search;
        let heuristics = Heuristics::new(crossword, search.variable_ordering, search.value_ordering);
        let inference = self.settings.propagation.maintain_arc_consistency;

        if search.parallel {
            return run_parallel(crossword, heuristics, inference, cancellation, domains);
        }

        let mut backtracking = BacktrackingSearch::new(crossword, heuristics, inference, cancellation);
        let outcome = backtracking.run(domains, Assignment::new());
        (outcome, *backtracking.statistics())
    }

    fn finish(
        &self,
        status: SolveStatus,
        assignment: Option<Assignment>,
        mut statistics: SolveStatistics,
        start_time: Instant,
    ) -> SolveReport {
        statistics.solve_time = start_time.elapsed();
        info!(
            %status,
            nodes = statistics.search.nodes,
            backtracks = statistics.search.backtracks,
            elapsed_ms = statistics.solve_time.as_millis() as u64,
            "solve finished"
        );

        SolveReport {
            status,
            assignment,
            statistics,
        }
    }
}
