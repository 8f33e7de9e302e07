//! Top-level orchestration (spec.md §4.6-§4.9): owns the staging store and
//! the one frozen `Config`, and drives the five sub-phases pass 2 runs in
//! order (stage -> build DAG -> named areas -> unnamed areas/nodes/ways).
//! Grounded on the teacher's `rayon`-driven parallel loop and the worker-pool
//! idiom in `novelt-building-aggregation-tool`'s `fast_intersection` crate,
//! which drains a shared queue from a fixed-size `rayon` thread pool rather
//! than chunking work up front.

use std::collections::HashSet;

use rel_geom::Geom;
use rel_stage::{AreaRecord, NodeRecord, StagingStore, WayRecord};
use rel_storage::{DeserializeFromMinimal, StreamReader};

use crate::config::Config;
use crate::dag::AreaDag;
use crate::error::EngineError;
use crate::iri::{node_iri, way_iri};
use crate::sink::TripleSink;
use crate::stats::RelationStats;

pub struct Engine {
    config: Config,
    stage: StagingStore,
    stats: RelationStats,
    pool: rayon::ThreadPool,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let stage = StagingStore::create(&config.temp_dir, config.cache_max_entries)?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .build()
            .map_err(|e| EngineError::Config(e.to_string()))?;
        Ok(Engine {
            config,
            stage,
            stats: RelationStats::new(),
            pool,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &RelationStats {
        &self.stats
    }

    pub fn stage_node(&self, rec: NodeRecord) -> Result<(), EngineError> {
        self.stage.stage_node(rec)?;
        Ok(())
    }

    pub fn stage_way(&self, rec: WayRecord) -> Result<(), EngineError> {
        self.stage.stage_way(rec)?;
        Ok(())
    }

    /// `named` comes from the (out-of-scope) tag layer: an area is named iff
    /// it carries a `name` tag. An area below `min_area_envelope_ratio` is
    /// demoted to unnamed regardless (spec.md §4.6).
    pub fn stage_area(&self, mut rec: AreaRecord, named: bool) -> Result<(), EngineError> {
        if let Some(level) = self.config.simplify_geometries {
            rec.geom = rel_geom::simplify(&rec.geom, 1.0, level);
        }

        let ratio = envelope_ratio(&rec);
        if named && ratio >= self.config.min_area_envelope_ratio {
            self.stage.stage_named_area(rec);
        } else {
            self.stage.stage_unnamed_area(rec)?;
        }
        Ok(())
    }

    /// Closes the staging files for writing; must be called once every
    /// feature has been staged and before `prepare` or any `run_*` phase.
    pub fn finish_staging(&self) -> Result<(), EngineError> {
        self.stage.flush()?;
        Ok(())
    }

    /// Builds the named-area DAG (spec.md §4.7.3). Consumes the in-memory
    /// named-area vector, so it can only be called once per run.
    pub fn prepare(&self) -> AreaDag {
        let areas = self.stage.take_named_areas();
        let stats = &self.stats;
        self.pool.install(|| crate::dag::build(areas, stats))
    }

    /// Named-area relation phase (spec.md §4.7.4): one pass over the
    /// reduced DAG's edges, no streaming involved.
    pub fn run_named_area_relations(&self, dag: &AreaDag, sink: &dyn TripleSink) {
        if self.config.no_area_geom_relations {
            return;
        }
        crate::named::emit(dag, sink);
        self.stats.report("named-area");
    }

    /// Unnamed-area relation phase: every staged unnamed area is probed
    /// against the DAG with an `intersects(envelope)` candidate query.
    pub fn run_unnamed_area_relations(
        &self,
        dag: &AreaDag,
        sink: &dyn TripleSink,
    ) -> Result<(), EngineError> {
        if self.config.no_area_geom_relations {
            return Ok(());
        }
        let reader = self.stage.stream_unnamed_areas()?;
        self.pool.install(|| {
            drain_parallel(&reader, self.config.num_threads, |_, rec: AreaRecord| {
                let probe_iri = crate::iri::area_iri(rec.from_way, rec.obj_id);
                let env = rec.envelope();
                crate::probes::probe(
                    dag,
                    &self.config,
                    &self.stats,
                    &Geom::Area(rec.geom.clone()),
                    &env,
                    &probe_iri,
                    false,
                    rec.is_admin,
                    &HashSet::new(),
                    sink,
                );
            })
        })?;
        self.stats.report("unnamed-area");
        Ok(())
    }

    /// Node relation phase: `covers(envelope)` candidate query, per spec.md
    /// §4.7.5 step 1.
    pub fn run_node_relations(&self, dag: &AreaDag, sink: &dyn TripleSink) -> Result<(), EngineError> {
        if self.config.no_node_geom_relations {
            return Ok(());
        }
        let reader = self.stage.stream_nodes()?;
        self.pool.install(|| {
            drain_parallel(&reader, self.config.num_threads, |_, rec: NodeRecord| {
                let probe_iri = node_iri(rec.id);
                crate::probes::probe(
                    dag,
                    &self.config,
                    &self.stats,
                    &Geom::Point(rec.geom),
                    &rec.envelope,
                    &probe_iri,
                    true,
                    false,
                    &HashSet::new(),
                    sink,
                );
            })
        })?;
        self.stats.report("node");
        Ok(())
    }

    /// Way relation phase. A way already represented as a named area (the
    /// `way_id * 2` internal-id convention resolved in DESIGN.md, spec.md
    /// §9) is skipped entirely, since the named-area phase already emitted
    /// its facts. Otherwise the way's own vertices seed the node-touch
    /// intersects shortcut before the normal candidate loop runs.
    pub fn run_way_relations(&self, dag: &AreaDag, sink: &dyn TripleSink) -> Result<(), EngineError> {
        if self.config.no_way_geom_relations {
            return Ok(());
        }
        let reader = self.stage.stream_ways()?;
        self.pool.install(|| {
            drain_parallel(&reader, self.config.num_threads, |_, rec: WayRecord| {
                let way_area_id = rec.id.wrapping_mul(2);
                if dag.area_already_has_successors(way_area_id) {
                    self.stats.record_skip_by_dag();
                    return;
                }

                let preseeded = crate::probes::node_touch_shortcut(dag, &rec.geom);
                let probe_iri = way_iri(rec.id);
                crate::probes::probe(
                    dag,
                    &self.config,
                    &self.stats,
                    &Geom::Line(rec.geom.clone()),
                    &rec.envelope,
                    &probe_iri,
                    false,
                    false,
                    &preseeded,
                    sink,
                );
            })
        })?;
        self.stats.report("way");
        Ok(())
    }
}

/// `area / envelope_area`; treated as `1.0` (never demoted) when the
/// envelope is degenerate (zero width or height), matching the "divide by
/// zero never demotes" reading of spec.md §4.6.
fn envelope_ratio(rec: &AreaRecord) -> f64 {
    let env = rec.envelope();
    let w = env.max().x - env.min().x;
    let h = env.max().y - env.min().y;
    let envelope_area = w * h;
    if envelope_area <= 0.0 {
        1.0
    } else {
        rec.area / envelope_area
    }
}

/// Drains `reader` from a fixed-size pool of workers instead of chunking
/// records up front, so a slow record never starves idle workers (grounded
/// on the teacher's worker-pool style in `fast_intersection::cmd_intersect`).
/// `num_threads == 0` defers to the ambient pool's own worker count via
/// `rayon::current_num_threads`.
fn drain_parallel<W, F>(reader: &StreamReader<W>, num_threads: usize, body: F) -> std::io::Result<()>
where
    W: for<'d> DeserializeFromMinimal<ExternalData<'d> = ()> + Send,
    F: Fn(u64, W) + Sync,
{
    use rayon::prelude::*;

    let threads = if num_threads == 0 {
        rayon::current_num_threads()
    } else {
        num_threads
    };
    let error: parking_lot::Mutex<Option<std::io::Error>> = parking_lot::Mutex::new(None);

    (0..threads).into_par_iter().for_each(|_| loop {
        match reader.next_record() {
            Ok(Some((offset, rec))) => body(offset, rec),
            Ok(None) => break,
            Err(e) => {
                *error.lock() = Some(e);
                break;
            }
        }
    });

    match error.into_inner() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sink::VecSink;
    use geo::polygon;
    use rel_geom::{Envelope, MultiPolygon, Point};
    use std::collections::HashMap;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64, id: u64) -> AreaRecord {
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
            area: rel_geom::area(&mp),
            box_ids: rel_boxid::BoxIdList::new(),
            cutouts: HashMap::new(),
            convex_hull: poly.clone(),
            obb: poly,
        }
    }

    #[test]
    fn thin_named_area_is_demoted_to_unnamed() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.temp_dir = dir.path().to_path_buf();
        config.min_area_envelope_ratio = 0.5;
        let engine = Engine::new(config).unwrap();

        // A degenerate sliver: area is a tiny fraction of its envelope.
        let mut sliver = square(0.0, 0.0, 10.0, 0.0001, 1);
        sliver.area = 0.0001;
        engine.stage_area(sliver, true).unwrap();

        assert_eq!(engine.stage.named_area_count(), 0);
    }

    #[test]
    fn full_pipeline_emits_named_and_node_relations() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.temp_dir = dir.path().to_path_buf();
        let engine = Engine::new(config).unwrap();

        let inner = square(48.0, 7.51, 48.1, 7.61, 22);
        let outer = square(40.0, 7.0, 50.0, 8.0, 24);
        engine.stage_area(inner, true).unwrap();
        engine.stage_area(outer, true).unwrap();

        engine
            .stage_node(NodeRecord {
                envelope: Envelope::new((48.05, 7.56), (48.05, 7.56)),
                id: 1,
                geom: Point::new(48.05, 7.56),
            })
            .unwrap();

        engine.finish_staging().unwrap();
        let dag = engine.prepare();

        let sink = VecSink::new();
        engine.run_named_area_relations(&dag, &sink);
        engine.run_node_relations(&dag, &sink).unwrap();

        let triples = sink.into_triples();
        assert!(triples.contains(&(
            "osm_way:24".to_string(),
            "osm2rdf:contains_area".to_string(),
            "osm_way:22".to_string(),
        )));
        assert!(triples
            .iter()
            .any(|(_, p, o)| p == "osm2rdf:contains_non_area" && o == "osm_node:1"));
    }
}
