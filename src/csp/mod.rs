pub mod assignment;
pub mod consistency;
pub mod domains;
pub mod ordering;
pub mod search;

pub use assignment::Assignment;
pub use consistency::{ConsistencyEngine, DirectedArc, Propagation};
pub use domains::{DomainSnapshot, DomainStore};
pub use ordering::{Heuristics, NeighborLetters};
pub use search::{BacktrackingSearch, Cancellation, Interrupt, SearchOutcome, SearchStatistics};
