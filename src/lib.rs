//! `osm2rdf-relations`: the spatial relation engine (spec.md §1). The root
//! crate is a thin re-export over [`rel_engine`], the way the teacher's own
//! root crate is a thin binary shell over its component crates.

pub use rel_engine::{
    area_iri, node_iri, predicate, way_iri, AreaDag, Config, Engine, EngineError, RelationStats,
    TripleSink, VecSink,
};

pub use rel_stage::{AreaRecord, NodeRecord, StagingStore, WayRecord};
