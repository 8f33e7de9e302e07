//! Directed graph & DAG reducer (spec.md §4.4). New code (the teacher has
//! no graph module of its own), grounded on the reduction semantics
//! exercised by the original C++ `DirectedAcyclicGraph` test suite
//! (`original_source/tests/util/DirectedAcyclicGraph.cpp`): `reduce_dag` on
//! a full reachability graph yields the Hasse diagram, and is idempotent on
//! a graph that is already Hasse-like. Adjacency is a plain
//! `HashMap<u64, Vec<u64>>`, matching the teacher's avoidance of a generic
//! graph crate for anything this specialized.

pub mod bitset;

use std::collections::{HashMap, HashSet};

pub use bitset::Bitset;

#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    edges: HashMap<u64, Vec<u64>>,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_vertex(&mut self, v: u64) {
        self.edges.entry(v).or_default();
    }

    /// Adds `from -> to`, ensuring both endpoints exist as vertices.
    pub fn add_edge(&mut self, from: u64, to: u64) {
        self.ensure_vertex(to);
        let list = self.edges.entry(from).or_default();
        if !list.contains(&to) {
            list.push(to);
        }
    }

    pub fn edges(&self, v: u64) -> &[u64] {
        self.edges.get(&v).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn vertices(&self) -> impl Iterator<Item = u64> + '_ {
        self.edges.keys().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.edges.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.values().map(|v| v.len()).sum()
    }

    /// All vertices reachable from `v` by any path, computed by DFS.
    pub fn successors_slow(&self, v: u64) -> HashSet<u64> {
        let mut seen = HashSet::new();
        let mut stack = vec![v];

        while let Some(cur) = stack.pop() {
            for &next in self.edges(cur) {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }

        seen
    }

    /// Materializes the transitive closure of every vertex as a bitset,
    /// answering `successors_fast` in O(1) (spec.md §3).
    pub fn prepare_fast(&self) -> FastGraph {
        let mut ids: Vec<u64> = self.vertices().collect();
        ids.sort_unstable();

        let index_of: HashMap<u64, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        let n = ids.len();
        let mut closures: Vec<Bitset> = (0..n).map(|_| Bitset::new(n)).collect();

        for (i, &id) in ids.iter().enumerate() {
            for succ in self.successors_slow(id) {
                if let Some(&j) = index_of.get(&succ) {
                    closures[i].set(j);
                }
            }
        }

        FastGraph {
            ids,
            index_of,
            closures,
        }
    }
}

/// Frozen closure, built once by [`DirectedGraph::prepare_fast`] and then
/// read-only/lock-free for the rest of the engine's lifetime (spec.md §5).
pub struct FastGraph {
    ids: Vec<u64>,
    index_of: HashMap<u64, usize>,
    closures: Vec<Bitset>,
}

impl FastGraph {
    pub fn successors_fast(&self, v: u64) -> impl Iterator<Item = u64> + '_ {
        let bitset = self.index_of.get(&v).map(|&i| &self.closures[i]);
        bitset
            .into_iter()
            .flat_map(|b| b.iter_set())
            .map(move |i| self.ids[i])
    }

    pub fn is_ancestor(&self, v: u64, candidate: u64) -> bool {
        match (self.index_of.get(&v), self.index_of.get(&candidate)) {
            (Some(&vi), Some(&ci)) => self.closures[vi].get(ci),
            _ => false,
        }
    }
}

/// Reduces `g` to its Hasse diagram: for each vertex `v` and direct child
/// `c`, any other direct child `c'` reachable from `c` is dropped (spec.md
/// §4.4). Idempotent when `g` is already Hasse-like.
pub fn reduce_dag(g: &DirectedGraph) -> DirectedGraph {
    let mut result = DirectedGraph::new();

    for v in g.vertices() {
        result.ensure_vertex(v);
    }

    for v in g.vertices() {
        let children = g.edges(v);

        // Cache each child's reachable set once; children lists are small
        // (a handful of immediate containers) so this stays O(children^2).
        let reach: Vec<HashSet<u64>> = children.iter().map(|&c| g.successors_slow(c)).collect();

        for (i, &candidate) in children.iter().enumerate() {
            let redundant = children
                .iter()
                .enumerate()
                .any(|(j, _)| j != i && reach[j].contains(&candidate));

            if !redundant {
                result.add_edge(v, candidate);
            }
        }
    }

    result
}
