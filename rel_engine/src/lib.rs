//! Spatial relation engine (spec.md §4.6-§4.9): the named-area DAG build,
//! named/unnamed-area/node/way probing against it, and the `Engine` type
//! that threads a single frozen `Config` through every phase.

pub mod config;
pub mod dag;
pub mod engine;
pub mod error;
pub mod iri;
pub mod named;
pub mod probes;
pub mod sink;
pub mod stats;

pub use config::Config;
pub use dag::AreaDag;
pub use engine::Engine;
pub use error::EngineError;
pub use iri::{area_iri, node_iri, predicate, way_iri};
pub use sink::{TripleSink, VecSink};
pub use stats::RelationStats;
