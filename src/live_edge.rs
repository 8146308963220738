use rand::Rng;
use crate::network::Network;

/// Samples one live-edge graph of the Independent Cascade model: every edge is kept
/// independently iff a uniform draw from [0, 1) falls below its probability.
///
/// The result is indexed by dense node index and always spans the full node set,
/// isolated nodes included. Exactly one draw is consumed per edge.
pub fn sample_live_edges<R: Rng + ?Sized>(network: &Network, rng: &mut R) -> Vec<Vec<usize>> {
    let mut g: Vec<Vec<usize>> = vec![Vec::new(); network.node_count()];
    for e in network.edges() {
        let draw: f64 = rng.gen();
        if draw < e.probability {
            g[e.from].push(e.to);
        }
    }
    g
}
