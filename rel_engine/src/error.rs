//! Error taxonomy (spec.md §7): only I/O and out-of-memory propagate
//! outward. Geometry validity is absorbed at the predicate boundary inside
//! `rel_geom` and never reaches this enum.

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("out of memory: {0}")]
    OutOfMemory(String),
}
