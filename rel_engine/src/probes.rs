//! Unnamed-area / node / way relation phase (spec.md §4.7.5): every
//! streamed probe is tested against the named-area DAG, with two
//! per-probe skip sets pruning re-tests already implied by DAG ancestry.

use std::collections::HashSet;

use rel_geom::{covered_by, covered_by_envelope, intersects, Envelope, Geom, LineString, Point};

use crate::config::Config;
use crate::dag::AreaDag;
use crate::iri::predicate;
use crate::sink::TripleSink;
use crate::stats::RelationStats;

/// Runs the candidate loop described in spec.md §4.7.5 steps 1-4 for one
/// probe. `use_covers_query` selects `covers(envelope(p))` (nodes) over
/// `intersects(envelope(p))` (ways, unnamed areas). `preseeded_intersects`
/// holds candidate indices for which intersection is already known to hold
/// without running the predicate (the way node-containment pre-pass,
/// spec.md §4.7.5 step 5); pass an empty set for nodes and unnamed areas.
#[allow(clippy::too_many_arguments)]
pub fn probe(
    dag: &AreaDag,
    config: &Config,
    stats: &RelationStats,
    probe_geom: &Geom,
    probe_env: &Envelope,
    probe_iri: &str,
    use_covers_query: bool,
    probe_is_admin: bool,
    preseeded_intersects: &HashSet<usize>,
    sink: &dyn TripleSink,
) {
    let mut candidates: Vec<usize> = if use_covers_query {
        dag.rtree.covers_query(probe_env).copied().collect()
    } else {
        dag.rtree.query_envelope(probe_env).copied().collect()
    };
    candidates.sort_by(|&a, &b| {
        dag.areas[a]
            .area
            .partial_cmp(&dag.areas[b].area)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.cmp(&b))
    });

    let mut skip_intersects: HashSet<usize> = HashSet::new();
    let mut skip_contains: HashSet<usize> = HashSet::new();

    for a in candidates {
        let area = &dag.areas[a];

        if config.skip_admin_on_admin && probe_is_admin && area.is_admin {
            continue;
        }

        let area_iri = crate::iri::area_iri(area.from_way, area.obj_id);

        let intersects_holds = if skip_intersects.contains(&a) {
            stats.record_skip_by_dag();
            true
        } else if preseeded_intersects.contains(&a) {
            stats.record_skip_by_node_info();
            sink.write_triple(&area_iri, predicate::INTERSECTS_NON_AREA, probe_iri);
            for anc in dag.fast.successors_fast(a as u64) {
                skip_intersects.insert(anc as usize);
            }
            true
        } else {
            stats.record_check();
            if intersects(probe_geom, &area.geom) {
                sink.write_triple(&area_iri, predicate::INTERSECTS_NON_AREA, probe_iri);
                for anc in dag.fast.successors_fast(a as u64) {
                    skip_intersects.insert(anc as usize);
                }
                true
            } else {
                false
            }
        };

        if !intersects_holds {
            continue;
        }

        if skip_contains.contains(&a) {
            continue;
        }
        if !covered_by_envelope(probe_env, &area.envelope()) {
            continue;
        }
        stats.record_check();
        if covered_by(probe_geom, &area.geom) {
            sink.write_triple(&area_iri, predicate::CONTAINS_NON_AREA, probe_iri);
            for anc in dag.fast.successors_fast(a as u64) {
                skip_contains.insert(anc as usize);
            }
        }
    }
}

/// Builds the way-only node-containment pre-pass (spec.md §4.7.5 step 5):
/// every named area that covers at least one of the way's own vertices.
/// Computed directly from the way's linestring rather than from a
/// persisted per-node map, which is equivalent output and far cheaper at
/// scale than keeping containment state for every node forever.
pub fn node_touch_shortcut(dag: &AreaDag, way_geom: &LineString<f64>) -> HashSet<usize> {
    let mut touched = HashSet::new();
    for coord in way_geom.coords() {
        let point = Point(*coord);
        let env = Envelope::new((coord.x, coord.y), (coord.x, coord.y));
        for &a in dag.rtree.covers_query(&env) {
            if touched.contains(&a) {
                continue;
            }
            if covered_by(&Geom::Point(point), &dag.areas[a].geom) {
                touched.insert(a);
            }
        }
    }
    touched
}
