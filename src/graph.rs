use std::collections::VecDeque;
use bit_set::BitSet;

// This module contains pure graph functionality.
// Graphs are represented as Vec<Vec<usize>> (out-neighbors per vertex).

/// Returns the graph with every arc reversed.
pub fn reverse(g: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut grev: Vec<Vec<usize>> = vec![Vec::new(); g.len()];
    for u in 0..g.len() {
        for v in g[u].iter().cloned() {
            grev[v].push(u);
        }
    }
    grev
}

/// Returns the vertices of g in order of increasing DFS finishing time. Roots are tried in
/// ascending vertex order and neighbors in adjacency order, so the result is reproducible.
/// Uses an explicit stack, graphs may be far deeper than the call stack allows.
pub fn finishing_order(g: &[Vec<usize>]) -> Vec<usize> {
    let mut vis = vec![false; g.len()];
    let mut ord: Vec<usize> = Vec::with_capacity(g.len());
    // (vertex, index of the next neighbor to look at)
    let mut stack: Vec<(usize, usize)> = Vec::new();
    for s in 0..g.len() {
        if vis[s] {
            continue;
        }
        vis[s] = true;
        stack.push((s, 0));
        while let Some((u, i)) = stack.pop() {
            if i < g[u].len() {
                stack.push((u, i + 1));
                let v = g[u][i];
                if !vis[v] {
                    vis[v] = true;
                    stack.push((v, 0));
                }
            } else {
                ord.push(u);
            }
        }
    }
    ord
}

/// Breadth-first search from all sources at once, restricted to vertices in `alive`.
/// Returns the visited vertices in visiting order; sources outside `alive` are ignored.
pub fn bfs_within(g: &[Vec<usize>], sources: &[usize], alive: &BitSet) -> Vec<usize> {
    let mut vis = BitSet::with_capacity(g.len());
    let mut order: Vec<usize> = Vec::new();
    let mut q: VecDeque<usize> = VecDeque::new();
    for s in sources.iter().cloned() {
        if alive.contains(s) && vis.insert(s) {
            q.push_back(s);
        }
    }
    while let Some(u) = q.pop_front() {
        order.push(u);
        for v in g[u].iter().cloned() {
            if alive.contains(v) && vis.insert(v) {
                q.push_back(v);
            }
        }
    }
    order
}

/// Breadth-first search over the whole graph.
pub fn bfs(g: &[Vec<usize>], sources: &[usize]) -> Vec<usize> {
    let all: BitSet = (0..g.len()).collect();
    bfs_within(g, sources, &all)
}
