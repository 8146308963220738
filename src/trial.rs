use std::collections::VecDeque;
use bit_set::BitSet;
use rand::Rng;
use tracing::debug;
use crate::graph;
use crate::live_edge;
use crate::network::Network;
use crate::reachability::Reachability;
use crate::scc::Condensation;

#[derive(Debug, Clone, Copy, Default)]
struct CachedGain {
    valid: bool,
    value: u64,
}

/// Visited marks that are cleared in O(1) by bumping the epoch.
struct Scratch {
    stamp: Vec<u32>,
    epoch: u32,
    queue: VecDeque<usize>,
}

impl Scratch {
    fn new(n: usize) -> Scratch {
        Scratch { stamp: vec![0; n], epoch: 0, queue: VecDeque::new() }
    }

    fn reset(&mut self) {
        self.queue.clear();
        if self.epoch == u32::MAX {
            self.stamp.iter_mut().for_each(|s| *s = 0);
            self.epoch = 0;
        }
        self.epoch += 1;
    }

    #[inline]
    fn insert(&mut self, c: usize) -> bool {
        if self.stamp[c] == self.epoch {
            return false;
        }
        self.stamp[c] = self.epoch;
        true
    }
}

/// One sampled world of the Independent Cascade model.
///
/// A trial owns the condensation of its live-edge graph, the hub sets computed right after
/// condensing, the set of components that are not yet covered by a seed, and a gain cache
/// indexed by component id. Component ids are local to the trial.
pub struct Trial {
    dag: Condensation,
    reach: Reachability,
    alive: BitSet,
    cache: Vec<CachedGain>,
    seeded: bool,
    scratch: Scratch,
}

impl Trial {
    /// Samples a live-edge graph of `network` with `rng` and prepares it for gain queries.
    pub fn build<R: Rng + ?Sized>(network: &Network, rng: &mut R) -> Trial {
        let live = live_edge::sample_live_edges(network, rng);
        Trial::from_live_graph(&live)
    }

    /// Prepares an already sampled live-edge graph, given as adjacency lists over dense indices.
    pub fn from_live_graph(g: &[Vec<usize>]) -> Trial {
        let dag = Condensation::new(g);
        let reach = Reachability::new(&dag);
        debug!(
            nodes = g.len(),
            components = dag.n,
            hub = reach.hub,
            ancestors = reach.ancestors.len(),
            descendants = reach.descendants.len(),
            "trial built"
        );
        let n = dag.n;
        Trial {
            alive: (0..n).collect(),
            cache: vec![CachedGain::default(); n],
            seeded: false,
            scratch: Scratch::new(n),
            dag,
            reach,
        }
    }

    pub fn condensation(&self) -> &Condensation {
        &self.dag
    }

    pub fn reachability(&self) -> &Reachability {
        &self.reach
    }

    /// Component of vertex v, or None if v is unknown or already covered by a seed.
    pub fn component_of(&self, v: usize) -> Option<usize> {
        self.dag.labels.get(v).copied().filter(|c| self.alive.contains(*c))
    }

    /// Whether component c holds a valid cached gain.
    pub fn is_cached(&self, c: usize) -> bool {
        self.alive.contains(c) && self.cache[c].valid
    }

    /// Marginal coverage of vertex v: the total weight of uncovered components reachable from
    /// its component. Zero if v is unknown or covered.
    pub fn gain(&mut self, v: usize) -> u64 {
        match self.component_of(v) {
            Some(c) => self.component_gain(c),
            None => 0,
        }
    }

    fn component_gain(&mut self, c: usize) -> u64 {
        if !self.alive.contains(c) {
            return 0;
        }
        if self.cache[c].valid {
            return self.cache[c].value;
        }
        // Before any pruning every ancestor of the hub reaches all of D, so the hub's coverage
        // is counted once and D is skipped during the walk. Only exact while nothing is pruned.
        let shortcut = !self.seeded && self.reach.ancestors.contains(c);
        let mut total = if shortcut { self.component_gain(self.reach.hub) } else { 0 };

        let skip = if shortcut { Some(&self.reach.descendants) } else { None };
        let scratch = &mut self.scratch;
        scratch.reset();
        scratch.insert(c);
        scratch.queue.push_back(c);
        while let Some(u) = scratch.queue.pop_front() {
            if skip.map_or(false, |d| d.contains(u)) {
                continue;
            }
            total += self.dag.weight(u);
            for w in self.dag.g[u].iter().cloned() {
                if self.alive.contains(w) && scratch.insert(w) {
                    scratch.queue.push_back(w);
                }
            }
        }
        self.cache[c] = CachedGain { valid: true, value: total };
        total
    }

    /// Removes everything covered by seed vertex t and invalidates the cached gain of every
    /// component that could reach the removed part. Returns the number of removed components.
    pub fn update(&mut self, t: usize) -> usize {
        self.seeded = true;
        let c = match self.component_of(t) {
            Some(c) => c,
            None => return 0,
        };
        let covered = graph::bfs_within(&self.dag.g, &[c], &self.alive);
        let reaching = graph::bfs_within(&self.dag.grev, &covered, &self.alive);
        for r in reaching.iter().cloned() {
            self.cache[r].valid = false;
        }
        for u in covered.iter().cloned() {
            self.alive.remove(u);
        }
        debug!(seed = t, removed = covered.len(), invalidated = reaching.len(), "trial pruned");
        covered.len()
    }
}
