//! Influence maximization under the Independent Cascade model with the
//! Prune-and-Maximum-Coverage (PMC) heuristic.
//!
//! Live-edge graphs are sampled once per trial and condensed into DAGs of strongly
//! connected components. Greedy rounds then query marginal gains on those DAGs and prune
//! whatever the chosen seed covers.

pub mod error;
pub mod network;
pub mod graph;
pub mod live_edge;
pub mod scc;
pub mod reachability;
pub mod trial;
pub mod pmc;

// Re-exports to flatten the crate.
pub use error::PmcError;
pub use network::{Edge, Network};
pub use pmc::{GreedySelection, InfluenceMaximizer, Pick, PmcConfig};
pub use trial::Trial;
