use bit_set::BitSet;
use crate::graph;
use crate::scc::Condensation;

/// Hub of a condensation together with everything that reaches it and everything it reaches.
///
/// Computed once per trial on the unpruned condensation and never refreshed afterwards.
pub struct Reachability {
    pub hub: usize,
    pub ancestors: BitSet,   // components that reach the hub, hub excluded
    pub descendants: BitSet, // components reached from the hub, hub included
}

impl Reachability {
    pub fn new(dag: &Condensation) -> Reachability {
        let hub = elect_hub(dag);
        let all: BitSet = (0..dag.n).collect();
        let descendants: BitSet = graph::bfs_within(&dag.g, &[hub], &all).into_iter().collect();
        let mut ancestors: BitSet = graph::bfs_within(&dag.grev, &[hub], &all).into_iter().collect();
        ancestors.remove(hub);
        Reachability { hub, ancestors, descendants }
    }
}

/// Component with the largest out-degree, the lowest id among equals.
fn elect_hub(dag: &Condensation) -> usize {
    let mut hub = 0;
    for c in 1..dag.n {
        if dag.out_degree(c) > dag.out_degree(hub) {
            hub = c;
        }
    }
    hub
}
