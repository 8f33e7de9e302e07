//! Named-area DAG build (spec.md §4.7.3). Vertices are indices into the
//! area list after it has been sorted ascending by geodesic area (ties
//! broken by internal id), so vertex `v` always denotes a smaller-or-equal
//! area than any of its DAG ancestors.
//!
//! Deliberate simplification recorded in DESIGN.md: spec.md's step 4 asks
//! each container candidate to be skipped once it is already a known
//! ancestor of an edge added so far, as a performance optimization. Doing
//! that safely under the "in parallel, for each area e" scheme would need
//! a topological barrier between areas of different sizes, since a
//! container `a`'s own edges (to containers larger than `a`) may not exist
//! yet while `a` is being considered as someone else's container. Since
//! `reduce_dag` already removes any transitive edge this pruning would
//! have avoided discovering, correctness does not depend on the skip set;
//! it is omitted here and every candidate is tested directly.

use std::collections::HashMap;

use parking_lot::Mutex;
use rel_geom::{area_covered_by, equals};
use rel_rtree::RTreeIndex;
use rel_stage::AreaRecord;

use crate::stats::RelationStats;

pub struct AreaDag {
    /// Areas sorted ascending by geodesic area; vertex ids index into this.
    pub areas: Vec<AreaRecord>,
    pub rtree: RTreeIndex<usize>,
    pub reduced: rel_graph::DirectedGraph,
    pub fast: rel_graph::FastGraph,
    /// Internal area id (`AreaRecord::id`) -> vertex index, used by the
    /// "way already represented as area" check (spec.md §9: `way_id·2`).
    pub id_index: HashMap<u64, usize>,
}

impl AreaDag {
    /// `true` iff `internal_area_id` names a named area that has at least
    /// one DAG ancestor, i.e. the named-area phase already emitted facts
    /// for it (spec.md §4.7.5 step 6).
    pub fn area_already_has_successors(&self, internal_area_id: u64) -> bool {
        self.id_index
            .get(&internal_area_id)
            .is_some_and(|&idx| self.fast.successors_fast(idx as u64).next().is_some())
    }
}

/// Sorts `areas` ascending by `area`, tie-broken by internal `id`
/// (spec.md §3 invariant / §4.7.3 step 1).
pub fn sort_named_areas(mut areas: Vec<AreaRecord>) -> Vec<AreaRecord> {
    areas.sort_by(|a, b| {
        a.area
            .partial_cmp(&b.area)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    areas
}

pub fn build(areas: Vec<AreaRecord>, stats: &RelationStats) -> AreaDag {
    let areas = sort_named_areas(areas);

    let rtree = RTreeIndex::build(
        areas
            .iter()
            .enumerate()
            .map(|(i, a)| (i, a.envelope())),
    );

    let graph = Mutex::new(rel_graph::DirectedGraph::new());
    for i in 0..areas.len() {
        graph.lock().ensure_vertex(i as u64);
    }

    use rayon::prelude::*;
    (0..areas.len()).into_par_iter().for_each(|e| {
        let env = areas[e].envelope();
        let mut candidates: Vec<usize> = rtree
            .covers_query(&env)
            .copied()
            .filter(|&a| a != e)
            .collect();
        candidates.sort_by(|&a, &b| {
            areas[a]
                .area
                .partial_cmp(&areas[b].area)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(&b))
        });

        let mut local_edges = Vec::new();
        for a in candidates {
            stats.record_check();
            if area_covered_by(&areas[e].geom, &areas[a].geom)
                && !equals(&areas[e].geom, &areas[a].geom)
            {
                local_edges.push(a);
            }
        }

        if !local_edges.is_empty() {
            let mut g = graph.lock();
            for a in local_edges {
                g.add_edge(e as u64, a as u64);
            }
        }
    });

    let full = graph.into_inner();
    let reduced = rel_graph::reduce_dag(&full);
    let fast = reduced.prepare_fast();
    let id_index = areas.iter().enumerate().map(|(i, a)| (a.id, i)).collect();

    AreaDag {
        areas,
        rtree,
        reduced,
        fast,
        id_index,
    }
}
