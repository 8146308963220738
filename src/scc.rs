use crate::graph;

/// Condensation of a live-edge graph: one vertex per strongly connected component.
///
/// Components are numbered `0..n` in the order the second Kosaraju pass discovers them,
/// which is a topological order of the condensation (every arc goes from a lower to a
/// higher id). The numbering only depends on the input graph, never on hashing.
pub struct Condensation {
    pub n: usize,
    pub labels: Vec<usize>,       // labels[v] = component of vertex v
    pub members: Vec<Vec<usize>>, // vertices aggregated by each component
    pub g: Vec<Vec<usize>>,       // successor components, sorted and without duplicates
    pub grev: Vec<Vec<usize>>,    // predecessor components
}

impl Condensation {
    /// Kosaraju's algorithm with explicit stacks. The first pass computes a finishing order
    /// on g, the second pass walks predecessors in reverse finishing order. Whenever a
    /// predecessor already belongs to an earlier component, the arc between both components
    /// is recorded.
    pub fn new(g: &[Vec<usize>]) -> Condensation {
        let ord = graph::finishing_order(g);
        let grev = graph::reverse(g);
        let unassigned = usize::MAX;
        let mut labels = vec![unassigned; g.len()];
        let mut members: Vec<Vec<usize>> = Vec::new();
        let mut dag: Vec<Vec<usize>> = Vec::new();
        let mut stack: Vec<usize> = Vec::new();
        for s in ord.into_iter().rev() {
            if labels[s] != unassigned {
                continue;
            }
            let label = members.len();
            let mut scc: Vec<usize> = Vec::new();
            dag.push(Vec::new());
            labels[s] = label;
            stack.push(s);
            while let Some(v) = stack.pop() {
                scc.push(v);
                for u in grev[v].iter().cloned() {
                    if labels[u] == unassigned {
                        labels[u] = label;
                        stack.push(u);
                    } else if labels[u] != label {
                        dag[labels[u]].push(label);
                    }
                }
            }
            members.push(scc);
        }
        for succ in dag.iter_mut() {
            succ.sort_unstable();
            succ.dedup();
        }
        let dagrev = graph::reverse(&dag);
        Condensation { n: members.len(), labels, members, g: dag, grev: dagrev }
    }

    /// Number of original vertices aggregated by component c.
    #[inline]
    pub fn weight(&self, c: usize) -> u64 {
        self.members[c].len() as u64
    }

    #[inline]
    pub fn out_degree(&self, c: usize) -> usize {
        self.g[c].len()
    }
}
