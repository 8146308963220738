use std::collections::BTreeMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};
use crate::error::PmcError;
use crate::network::Network;
use crate::trial::Trial;

/// Parameters of one influence maximization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PmcConfig {
    /// Number of seeds to select.
    pub k: usize,
    /// Number of sampled live-edge graphs.
    pub trials: usize,
    /// Base seed; trial `i` draws from its own generator derived from `(seed, i)`.
    pub seed: u64,
}

impl Default for PmcConfig {
    fn default() -> Self {
        PmcConfig { k: 1, trials: 200, seed: 0 }
    }
}

impl PmcConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Random source of trial `index`. Independent of scheduling, so runs replay exactly.
pub fn trial_rng(seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Samples and condenses all trials, in parallel.
pub fn build_trials(network: &Network, trials: usize, seed: u64) -> Vec<Trial> {
    (0..trials)
        .into_par_iter()
        .map(|i| Trial::build(network, &mut trial_rng(seed, i)))
        .collect()
}

/// One greedy pick: the node and its average marginal gain at the time it was picked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub node: usize,
    pub gain: f64,
}

/// Greedy seed selection over a fixed set of trials, one round per `next()`.
///
/// Dropping the iterator between rounds is a clean abort: every pick handed out so far
/// has already been pruned from all trials.
pub struct GreedySelection<'a> {
    network: &'a Network,
    trials: Vec<Trial>,
    chosen: Vec<bool>,
    remaining: usize,
    round: usize,
    last_round: Option<BTreeMap<usize, f64>>,
}

impl<'a> GreedySelection<'a> {
    pub fn new(network: &'a Network, trials: Vec<Trial>, k: usize) -> GreedySelection<'a> {
        GreedySelection {
            network,
            trials,
            chosen: vec![false; network.node_count()],
            remaining: k.min(network.node_count()),
            round: 0,
            last_round: None,
        }
    }

    /// Average marginal gain of every node in the most recent round, keyed by node id.
    pub fn last_round(&self) -> Option<&BTreeMap<usize, f64>> {
        self.last_round.as_ref()
    }

    pub fn into_last_round(self) -> Option<BTreeMap<usize, f64>> {
        self.last_round
    }

    /// Sum of gains over all trials for every dense node index. Each worker owns one trial
    /// while it evaluates, integer sums keep the result independent of the reduction order.
    fn gain_sums(&mut self) -> Vec<u64> {
        let n = self.network.node_count();
        let chosen = &self.chosen;
        self.trials
            .par_iter_mut()
            .map(|t| {
                (0..n).map(|v| if chosen[v] { 0 } else { t.gain(v) }).collect::<Vec<u64>>()
            })
            .reduce(
                || vec![0; n],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                    a
                },
            )
    }
}

impl<'a> Iterator for GreedySelection<'a> {
    type Item = Pick;

    fn next(&mut self) -> Option<Pick> {
        if self.remaining == 0 {
            return None;
        }
        let sums = self.gain_sums();
        let r = self.trials.len().max(1) as f64;

        // ascending dense index is ascending node id, so ties go to the lowest id
        let mut best: Option<usize> = None;
        for v in 0..sums.len() {
            if self.chosen[v] {
                continue;
            }
            if best.map_or(true, |b| sums[v] > sums[b]) {
                best = Some(v);
            }
        }
        let t = best?;
        self.chosen[t] = true;
        self.remaining -= 1;
        self.round += 1;

        let pick = Pick { node: self.network.id_of(t), gain: sums[t] as f64 / r };
        info!(round = self.round, node = pick.node, gain = pick.gain, "seed selected");
        self.last_round = Some(
            sums.iter()
                .enumerate()
                .map(|(v, s)| (self.network.id_of(v), *s as f64 / r))
                .collect(),
        );

        let removed: usize = self.trials.par_iter_mut().map(|trial| trial.update(t)).sum();
        debug!(round = self.round, removed, "trials pruned");
        Some(pick)
    }
}

/// Prune-and-Maximum-Coverage influence maximization under the Independent Cascade model.
///
/// # Example
/// ```
/// use pmc::{InfluenceMaximizer, Network, PmcConfig};
///
/// let network = Network::new(vec![(0, 1, 1.0), (1, 2, 0.5)]).unwrap();
/// let mut im = InfluenceMaximizer::new(&network, PmcConfig::default().with_trials(10)).unwrap();
/// assert_eq!(im.run(), &[0]);
/// ```
pub struct InfluenceMaximizer<'a> {
    network: &'a Network,
    config: PmcConfig,
    seeds: Vec<usize>,
    marginal_gains: Vec<f64>,
    last_round: Option<BTreeMap<usize, f64>>,
}

impl<'a> InfluenceMaximizer<'a> {
    pub fn new(network: &'a Network, config: PmcConfig) -> Result<InfluenceMaximizer<'a>, PmcError> {
        let nodes = network.node_count();
        if nodes == 0 {
            return Err(PmcError::EmptyGraph);
        }
        if config.k == 0 || config.k > nodes {
            return Err(PmcError::InvalidSeedCount { k: config.k, nodes });
        }
        if config.trials == 0 {
            return Err(PmcError::InvalidTrialCount);
        }
        Ok(InfluenceMaximizer {
            network,
            config,
            seeds: Vec::new(),
            marginal_gains: Vec::new(),
            last_round: None,
        })
    }

    pub fn config(&self) -> &PmcConfig {
        &self.config
    }

    /// Starts a fresh selection of up to `k` seeds on newly sampled trials.
    pub fn rounds(&self, k: usize) -> GreedySelection<'a> {
        info!(
            nodes = self.network.node_count(),
            edges = self.network.edge_count(),
            trials = self.config.trials,
            k,
            "building trials"
        );
        let trials = build_trials(self.network, self.config.trials, self.config.seed);
        GreedySelection::new(self.network, trials, k)
    }

    /// Selects `k` seeds, most influential first. Every call samples its trials anew.
    pub fn run(&mut self) -> &[usize] {
        let mut selection = self.rounds(self.config.k);
        let picks: Vec<Pick> = selection.by_ref().collect();
        self.seeds = picks.iter().map(|p| p.node).collect();
        self.marginal_gains = picks.iter().map(|p| p.gain).collect();
        self.last_round = selection.into_last_round();
        &self.seeds
    }

    /// Seeds of the most recent `run`, empty before the first one.
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Average marginal gain of each seed of the most recent `run`, in selection order.
    pub fn marginal_gains(&self) -> &[f64] {
        &self.marginal_gains
    }

    /// Estimated expected spread of the seeds of the most recent `run`.
    pub fn estimated_spread(&self) -> f64 {
        self.marginal_gains.iter().sum()
    }

    /// Expected spread of every node on its own. Runs a single round on fresh trials and
    /// leaves the stored seeds untouched.
    pub fn estimate_single_node_gains(&self) -> BTreeMap<usize, f64> {
        let mut selection = self.rounds(1);
        selection.next();
        selection.into_last_round().unwrap_or_default()
    }

    /// Per-node average gains of the last round of the most recent `run`, or the single
    /// node estimate if nothing has run yet.
    pub fn influence(&self) -> BTreeMap<usize, f64> {
        match &self.last_round {
            Some(gains) => gains.clone(),
            None => self.estimate_single_node_gains(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph;
    use crate::live_edge;

    #[test]
    fn single_edge_picks_the_source() {
        let net = Network::new(vec![(0, 1, 1.0)]).unwrap();
        let mut im = InfluenceMaximizer::new(&net, PmcConfig::default().with_trials(1)).unwrap();
        assert_eq!(im.config(), &PmcConfig { k: 1, trials: 1, seed: 0 });
        assert_eq!(im.run(), &[0]);
        let gains = im.influence();
        assert_eq!(gains[&0], 2.0);
        assert_eq!(gains[&1], 1.0);
        assert_eq!(im.estimated_spread(), 2.0);
    }

    #[test]
    fn influence_before_run_keeps_seeds_empty() {
        let net = Network::new(vec![(4, 9, 1.0), (9, 2, 1.0)]).unwrap();
        let im = InfluenceMaximizer::new(&net, PmcConfig::default().with_k(2).with_trials(3)).unwrap();
        let gains = im.influence();
        assert!(im.seeds().is_empty());
        assert_eq!(gains.len(), 3);
        assert_eq!(gains[&4], 3.0);
        assert_eq!(gains[&9], 2.0);
        assert_eq!(gains[&2], 1.0);
    }

    #[test]
    fn k1_matches_brute_force_average() {
        let edges = vec![
            (0, 1, 0.4), (1, 2, 0.7), (2, 0, 0.5), (2, 3, 0.9), (3, 4, 0.3),
            (4, 5, 0.8), (5, 3, 0.6), (6, 0, 0.2), (6, 5, 0.5), (1, 6, 0.3),
        ];
        let net = Network::new(edges).unwrap();
        let config = PmcConfig::default().with_trials(64).with_seed(17);
        let mut im = InfluenceMaximizer::new(&net, config).unwrap();
        let picked = im.run()[0];
        let gains = im.influence();

        let n = net.node_count();
        let mut sums = vec![0u64; n];
        for i in 0..config.trials {
            let g = live_edge::sample_live_edges(&net, &mut trial_rng(config.seed, i));
            for v in 0..n {
                sums[v] += graph::bfs(&g, &[v]).len() as u64;
            }
        }
        for v in 0..n {
            assert_eq!(gains[&net.id_of(v)], sums[v] as f64 / config.trials as f64);
        }
        let best = (0..n).fold(0, |b, v| if sums[v] > sums[b] { v } else { b });
        assert_eq!(picked, net.id_of(best));
    }

    #[test]
    fn seeds_are_distinct_when_everything_is_covered() {
        let net = Network::new(vec![(0, 1, 1.0), (1, 0, 1.0), (2, 0, 0.0)]).unwrap();
        let mut im = InfluenceMaximizer::new(&net, PmcConfig::default().with_k(3).with_trials(4)).unwrap();
        assert_eq!(im.run(), &[0, 2, 1]);
        assert_eq!(im.marginal_gains(), &[2.0, 1.0, 0.0]);
    }

    #[test]
    fn selection_can_stop_between_rounds() {
        let net = Network::new(vec![(0, 1, 1.0), (2, 3, 1.0), (3, 4, 1.0)]).unwrap();
        let im = InfluenceMaximizer::new(&net, PmcConfig::default().with_k(2).with_trials(2)).unwrap();
        let mut rounds = im.rounds(2);
        let first = rounds.next().unwrap();
        assert_eq!(first, Pick { node: 2, gain: 3.0 });
        assert_eq!(rounds.last_round().unwrap()[&0], 2.0);
        let second = rounds.next().unwrap();
        assert_eq!(second, Pick { node: 0, gain: 2.0 });
        assert_eq!(rounds.last_round().unwrap()[&3], 0.0);
        assert!(rounds.next().is_none());
    }

    #[test]
    fn rejects_bad_parameters() {
        let net = Network::new(vec![(0, 1, 0.5)]).unwrap();
        for config in [
            PmcConfig::default().with_k(0),
            PmcConfig::default().with_k(3),
            PmcConfig::default().with_trials(0),
        ] {
            let err = InfluenceMaximizer::new(&net, config).err().unwrap();
            assert!(err.is_invalid_input(), "{}", err);
        }
    }
}
