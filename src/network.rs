use std::collections::HashSet;
use std::io::BufRead;
use itertools::Itertools;
use crate::error::PmcError;

/// A directed edge of the input network, given in original node ids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub probability: f64,
}

/// Weighted directed graph consumed by the influence maximizer.
///
/// Node ids are arbitrary non-negative integers. Internally every node gets a dense index
/// `0..n` (its rank among the sorted ids), and all per-trial arrays are indexed by it.
pub struct Network {
    nodes: Vec<usize>,    // sorted original ids, nodes[i] is the id of dense index i
    edges: Vec<Edge>,     // edges in dense indices, in input order
}

impl Network {
    /// Validates the edge list and builds the network. The node set is the union of all endpoints.
    pub fn new<I: IntoIterator<Item = (usize, usize, f64)>>(edges: I) -> Result<Network, PmcError> {
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut raw: Vec<Edge> = Vec::new();
        for (from, to, probability) in edges {
            if !(0.0..=1.0).contains(&probability) {
                return Err(PmcError::InvalidProbability { from, to, probability });
            }
            if !seen.insert((from, to)) {
                return Err(PmcError::DuplicateEdge { from, to });
            }
            raw.push(Edge { from, to, probability });
        }
        if raw.is_empty() {
            return Err(PmcError::EmptyGraph);
        }
        let nodes: Vec<usize> = raw.iter().flat_map(|e| [e.from, e.to]).sorted_unstable().dedup().collect();
        let mut network = Network { nodes, edges: Vec::with_capacity(raw.len()) };
        for e in raw {
            // both endpoints are in `nodes`, so the search always hits
            let from = match network.nodes.binary_search(&e.from) { Ok(i) => i, Err(i) => i };
            let to = match network.nodes.binary_search(&e.to) { Ok(i) => i, Err(i) => i };
            network.edges.push(Edge { from, to, probability: e.probability });
        }
        Ok(network)
    }

    /// Reads one edge per line as `from to probability`, separated by commas and/or whitespace.
    /// Blank lines and lines starting with `#` or `c` are skipped, as is a leading header line
    /// (a first line without any numeric field).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Network, PmcError> {
        let mut edges: Vec<(usize, usize, f64)> = Vec::new();
        let mut header_allowed = true;
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let ll: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .collect();
            if ll.is_empty() || ll[0].starts_with('#') || ll[0] == "c" {
                continue;
            }
            if header_allowed && ll.iter().all(|f| f.parse::<f64>().is_err()) {
                header_allowed = false;
                continue;
            }
            header_allowed = false;
            let line_no = idx + 1;
            if ll.len() != 3 {
                return Err(PmcError::MalformedEdge {
                    line: line_no,
                    reason: format!("expected 3 fields, found {}", ll.len()),
                });
            }
            let malformed = |what: &str, s: &str| PmcError::MalformedEdge {
                line: line_no,
                reason: format!("cannot parse {} from {:?}", what, s),
            };
            let a = ll[0].parse::<usize>().map_err(|_| malformed("source node", ll[0]))?;
            let b = ll[1].parse::<usize>().map_err(|_| malformed("target node", ll[1]))?;
            let p = ll[2].parse::<f64>().map_err(|_| malformed("probability", ll[2]))?;
            edges.push((a, b, p));
        }
        Network::new(edges)
    }

    pub fn new_from_stdin() -> Result<Network, PmcError> {
        Network::from_reader(std::io::stdin().lock())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Original node ids in ascending order; position `i` holds the id of dense index `i`.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Edges in dense indices.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Dense index of an original node id, if the node occurs in the network.
    #[inline]
    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.nodes.binary_search(&id).ok()
    }

    #[inline]
    pub fn id_of(&self, index: usize) -> usize {
        self.nodes[index]
    }
}
