//! Small end-to-end demonstration: stages a handful of synthetic named
//! areas, a node, and a way through the relation engine, runs every phase,
//! and prints the resulting triples alongside the operator stats line
//! (spec.md §7). Not a substitute for the real (out-of-scope) OSM reader -
//! just enough to show the engine wired together start to finish.

use std::collections::HashMap;

use geo::polygon;
use osm2rdf_relations::{AreaRecord, Config, Engine, NodeRecord, TripleSink, VecSink, WayRecord};
use rel_geom::{area, Envelope, LineString, MultiPolygon, Point};

fn main() {
    env_logger::init();

    let temp_dir = std::env::temp_dir().join("osm2rdf-relations-stats-demo");
    std::fs::create_dir_all(&temp_dir).expect("create demo temp dir");

    let config = Config {
        temp_dir,
        ..Config::default()
    };
    let engine = Engine::new(config).expect("engine setup");

    engine
        .stage_area(square_area(48.0, 7.51, 48.1, 7.61, 22), true)
        .expect("stage inner area");
    engine
        .stage_area(square_area(40.0, 7.0, 50.0, 8.0, 24), true)
        .expect("stage outer area");

    engine
        .stage_node(NodeRecord {
            envelope: Envelope::new((48.05, 7.56), (48.05, 7.56)),
            id: 1,
            geom: Point::new(48.05, 7.56),
        })
        .expect("stage node");

    engine
        .stage_way(WayRecord {
            envelope: Envelope::new((47.9, 7.4), (48.2, 7.7)),
            id: 99,
            geom: LineString::new(vec![
                (47.9, 7.4).into(),
                (48.2, 7.4).into(),
                (48.2, 7.7).into(),
            ]),
            node_ids: vec![201, 202, 203],
            sub_envelopes: vec![Envelope::new((47.9, 7.4), (48.2, 7.7))],
            box_ids: rel_boxid::BoxIdList::new(),
            convex_hull: polygon![(x: 47.9, y: 7.4), (x: 48.2, y: 7.4), (x: 48.2, y: 7.7)],
            obb: polygon![(x: 47.9, y: 7.4), (x: 48.2, y: 7.4), (x: 48.2, y: 7.7)],
        })
        .expect("stage way");

    engine.finish_staging().expect("finish staging");

    let dag = engine.prepare();
    let sink = VecSink::new();

    engine.run_named_area_relations(&dag, &sink);
    engine
        .run_unnamed_area_relations(&dag, &sink)
        .expect("unnamed area phase");
    engine.run_node_relations(&dag, &sink).expect("node phase");
    engine.run_way_relations(&dag, &sink).expect("way phase");

    for (subject, predicate, object) in sink.triples() {
        println!("{subject} {predicate} {object} .");
    }

    engine.stats().report("demo");
}

fn square_area(x0: f64, y0: f64, x1: f64, y1: f64, id: u64) -> AreaRecord {
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
        obj_id: id,
        from_way: true,
        is_admin: false,
        geom: mp.clone(),
        inner: MultiPolygon::new(vec![]),
        outer: mp.clone(),
        area: area(&mp),
        box_ids: rel_boxid::BoxIdList::new(),
        cutouts: HashMap::new(),
        convex_hull: poly.clone(),
        obb: poly,
    }
}
