//! Named-area relation emission (spec.md §4.7.4): one `contains_area` and
//! one `intersects_area` triple per reduced DAG edge.

use crate::dag::AreaDag;
use crate::iri::{area_iri, predicate};
use crate::sink::TripleSink;

pub fn emit(dag: &AreaDag, sink: &dyn TripleSink) {
    for v in 0..dag.areas.len() {
        let e = &dag.areas[v];
        let e_iri = area_iri(e.from_way, e.obj_id);

        for &a_idx in dag.reduced.edges(v as u64) {
            let a = &dag.areas[a_idx as usize];
            let a_iri = area_iri(a.from_way, a.obj_id);

            sink.write_triple(&a_iri, predicate::CONTAINS_AREA, &e_iri);
            sink.write_triple(&a_iri, predicate::INTERSECTS_AREA, &e_iri);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dag::build;
    use crate::sink::VecSink;
    use crate::stats::RelationStats;
    use geo::polygon;
    use rel_geom::{Envelope, MultiPolygon};
    use rel_stage::AreaRecord;
    use std::collections::HashMap;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64, id: u64, from_way: bool) -> AreaRecord {
        let poly = polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
            (x: x0, y: y0),
        ];
        let mp = MultiPolygon::new(vec![poly.clone()]);
        AreaRecord {
            envelopes: vec![Envelope::new((x0, y0), (x1, y1))],
            id,
            obj_id: id - 10,
            from_way,
            is_admin: false,
            geom: mp.clone(),
            inner: MultiPolygon::new(vec![]),
            outer: mp.clone(),
            area: rel_geom::area(&mp),
            box_ids: rel_boxid::BoxIdList::new(),
            cutouts: HashMap::new(),
            convex_hull: poly.clone(),
            obb: poly,
        }
    }

    #[test]
    fn nested_pair_emits_both_predicates_in_the_right_direction() {
        let inner = square(48.0, 7.51, 48.1, 7.61, 22, true);
        let outer = square(40.0, 7.0, 50.0, 8.0, 24, true);

        let dag = build(vec![inner, outer], &RelationStats::new());
        let sink = VecSink::new();
        emit(&dag, &sink);

        let triples = sink.into_triples();
        assert!(triples.contains(&(
            "osm_way:14".to_string(),
            "osm2rdf:contains_area".to_string(),
            "osm_way:12".to_string(),
        )));
        assert!(triples.contains(&(
            "osm_way:14".to_string(),
            "osm2rdf:intersects_area".to_string(),
            "osm_way:12".to_string(),
        )));
        assert_eq!(triples.len(), 2);
    }
}
